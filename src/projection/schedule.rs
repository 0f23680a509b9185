//! Monthly period schedule for a projection

use chrono::{Datelike, Months, NaiveDate};

/// Zero-based month offsets from acquisition.
///
/// Spans twice the hold period so the twelve months after the exit
/// are available for the forward NOI window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSchedule {
    hold_period_months: u32,
}

impl PeriodSchedule {
    pub fn new(hold_period_months: u32) -> Self {
        Self { hold_period_months }
    }

    pub fn hold_period_months(&self) -> u32 {
        self.hold_period_months
    }

    /// Number of modeled periods (`2 × hold`)
    pub fn len(&self) -> usize {
        self.hold_period_months as usize * 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All modeled periods, starting at month 0
    pub fn periods(&self) -> impl Iterator<Item = u32> {
        0..self.hold_period_months * 2
    }

    /// Periods `0..=hold`, the window returns are measured over
    pub fn evaluation_window(&self) -> impl Iterator<Item = u32> {
        0..=self.hold_period_months
    }

    /// Whole years elapsed at `month`; growth compounds once per year
    pub fn year_index(month: u32) -> i32 {
        (month / 12) as i32
    }

    /// First calendar day of the month for `period`, counting from the
    /// acquisition month.
    pub fn calendar_month(acquisition: NaiveDate, period: u32) -> Option<NaiveDate> {
        acquisition
            .with_day(1)?
            .checked_add_months(Months::new(period))
    }
}
