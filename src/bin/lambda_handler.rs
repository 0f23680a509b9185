//! AWS Lambda handler for evaluating assets
//!
//! Accepts a JSON body holding one or more assumption sets and returns the
//! unlevered return metrics for each, in request order. An asset that
//! cannot be modeled carries its error instead of a result; the others are
//! unaffected.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use unlevered_returns::{evaluate_detailed, AssumptionSet, LineItemRow, ReturnResult};

/// Input for an evaluation request
#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    /// Assets to evaluate
    pub assets: Vec<AssumptionSet>,

    /// Include the monthly schedule over the hold period for each asset
    #[serde(default)]
    pub include_cashflows: bool,
}

#[derive(Debug, Serialize)]
struct AssetResponse {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ReturnResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cashflows: Option<Vec<LineItemRow>>,
}

#[derive(Debug, Serialize)]
struct EvaluationResponse {
    asset_count: usize,
    evaluated: usize,
    assets: Vec<AssetResponse>,
    execution_time_ms: u64,
}

fn evaluate_asset(index: usize, assumptions: &AssumptionSet, include_cashflows: bool) -> AssetResponse {
    match evaluate_detailed(assumptions) {
        Ok((projection, result)) => AssetResponse {
            index,
            result: Some(result),
            error: None,
            cashflows: include_cashflows.then(|| projection.evaluation_rows().to_vec()),
        },
        Err(e) => {
            log::warn!("asset {} not modeled: {}", index, e);
            AssetResponse {
                index,
                result: None,
                error: Some(e.to_string()),
                cashflows: None,
            }
        }
    }
}

fn response(status: i64, body: String) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut resp = LambdaFunctionUrlResponse {
        status_code: status,
        headers: Default::default(),
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    resp.headers.insert("content-type", "application/json".parse()?);
    resp.headers.insert("access-control-allow-origin", "*".parse()?);
    resp.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    resp.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(resp)
}

fn error_response(status: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    response(status, serde_json::json!({ "error": message }).to_string())
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, String::new());
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let request: EvaluationRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    if request.assets.is_empty() {
        return error_response(400, "No assets to evaluate");
    }

    let assets: Vec<AssetResponse> = request
        .assets
        .par_iter()
        .enumerate()
        .map(|(i, a)| evaluate_asset(i, a, request.include_cashflows))
        .collect();

    let body = EvaluationResponse {
        asset_count: assets.len(),
        evaluated: assets.iter().filter(|a| a.result.is_some()).count(),
        assets,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    response(200, serde_json::to_string(&body)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
