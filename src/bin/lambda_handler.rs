//! AWS Lambda handler for appraising case-study cash flows
//!
//! Accepts either pre-aggregated yearly flows or raw line items as JSON and
//! returns the appraisal report, including a tornado ranking when a
//! variation fraction is supplied.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use benefit_realization::{
    flows::{aggregate_flows, build_contributions},
    AppraisalError, AppraisalReport, Contribution, EstimateBasis, LineItem, YearlyFlow,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input for one appraisal
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalRequest {
    /// Pre-aggregated flows (ignored when `line_items` is present)
    #[serde(default)]
    pub flows: Vec<YearlyFlow>,

    /// Contributions aligned with `flows`, used for sensitivity
    #[serde(default)]
    pub contributions: Vec<Contribution>,

    /// Raw line items; aggregated into flows and contributions
    #[serde(default)]
    pub line_items: Option<Vec<LineItem>>,

    /// Estimate basis used to resolve line items (default: likely)
    #[serde(default)]
    pub basis: EstimateBasis,

    /// Per-period discount rate (default: 3.5%)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Sensitivity flex, e.g. 0.2 for ±20%; omitted skips sensitivity
    #[serde(default)]
    pub variation_fraction: Option<f64>,
}

fn default_discount_rate() -> f64 { 0.035 }

/// Function URL response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

fn cors_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Methods".to_string(), "POST, OPTIONS".to_string()),
        ("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string()),
    ])
}

fn error_response(status: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code: status,
        headers: cors_headers(),
        body: serde_json::json!({ "error": message }).to_string(),
    }
}

fn json_response(report: &AppraisalReport) -> Result<HttpResponse, AppraisalError> {
    Ok(HttpResponse {
        status_code: 200,
        headers: cors_headers(),
        body: serde_json::to_string(report)?,
    })
}

/// Parse a request body and build the report
fn appraise(body: &str) -> Result<AppraisalReport, AppraisalError> {
    let request: AppraisalRequest = serde_json::from_str(body)?;

    let (flows, contributions) = match request.line_items {
        Some(items) => (aggregate_flows(&items, request.basis), build_contributions(&items, request.basis)),
        None => (request.flows, request.contributions),
    };

    log::info!(
        "Appraising {} periods, {} contributions at {:.4} discount rate",
        flows.len(),
        contributions.len(),
        request.discount_rate
    );

    Ok(AppraisalReport::build(flows, request.discount_rate, &contributions, request.variation_fraction))
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<HttpResponse, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(HttpResponse {
            status_code: 200,
            headers: cors_headers(),
            body: String::new(),
        });
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "Binary request bodies are not supported"));
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let report = match appraise(&body) {
        Ok(report) => report,
        Err(AppraisalError::Json(e)) => return Ok(error_response(400, &format!("Invalid JSON: {}", e))),
        Err(e) => return Ok(error_response(500, &e.to_string())),
    };

    Ok(json_response(&report)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
