use napi::Result as NapiResult;
use napi_derive::napi;

use scenario_core::report::evaluate_request_json;
use scenario_core::{FinancialSnapshot, RatioSet};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_scenario(request_json: String) -> NapiResult<String> {
    evaluate_request_json(&request_json).map_err(to_napi_error)
}

#[napi]
pub fn reference_baseline() -> NapiResult<String> {
    let snapshot = FinancialSnapshot::reference();
    let body = serde_json::json!({
        "snapshot": snapshot,
        "ratios": RatioSet::from_snapshot(&snapshot),
    });
    serde_json::to_string(&body).map_err(to_napi_error)
}
