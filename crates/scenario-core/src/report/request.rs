use serde::{Deserialize, Serialize};

use crate::report::comparison::build_report;
use crate::scenario::input::ScenarioInput;
use crate::snapshot::FinancialSnapshot;
use crate::ScenarioResult;

/// A JSON evaluation request. Both parts are optional; the baseline falls
/// back to the 2025 reference projection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioRequest {
    #[serde(default)]
    pub scenario: ScenarioInput,
    #[serde(default)]
    pub baseline: Option<FinancialSnapshot>,
}

impl ScenarioRequest {
    pub fn baseline_or_reference(&self) -> FinancialSnapshot {
        self.baseline.unwrap_or_else(FinancialSnapshot::reference)
    }
}

/// Parse a request, build its report and return the report envelope as JSON.
pub fn evaluate_request_json(request_json: &str) -> ScenarioResult<String> {
    let request: ScenarioRequest = serde_json::from_str(request_json)?;
    let output = build_report(&request.baseline_or_reference(), &request.scenario)?;
    Ok(serde_json::to_string(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScenarioError;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn run(request: &str) -> Value {
        serde_json::from_str(&evaluate_request_json(request).unwrap()).unwrap()
    }

    #[test]
    fn test_omitted_baseline_uses_reference() {
        let v = run(r#"{ "scenario": { "order_frequency": "Monthly" } }"#);
        let revenue = &v["result"]["metrics"][0];
        assert_eq!(revenue["metric"], "Revenue");
        assert_eq!(revenue["baseline"], "2245891597.48");
        assert_eq!(v["result"]["scenario"]["order_frequency"], "monthly");
    }

    #[test]
    fn test_empty_request_uses_all_defaults() {
        let v = run("{}");
        assert_eq!(v["result"]["scenario"]["order_frequency"], "weekly");
        assert_eq!(v["result"]["scenario"]["demand_outlook"], "pessimistic");
        assert_eq!(v["result"]["scenario"]["annual_budget"], "100000.00");
    }

    #[test]
    fn test_supplied_baseline_is_used() {
        let mut base = FinancialSnapshot::reference();
        base.revenue = dec!(1000);
        let body = serde_json::json!({ "baseline": base }).to_string();
        let v = run(&body);
        assert_eq!(v["result"]["metrics"][0]["baseline"], "1000");
    }

    #[test]
    fn test_malformed_request_is_a_serialization_error() {
        let err = evaluate_request_json("{ not json").unwrap_err();
        assert!(matches!(err, ScenarioError::SerializationError(_)));
    }

    #[test]
    fn test_unknown_outlook_is_rejected() {
        let err = evaluate_request_json(r#"{ "scenario": { "demand_outlook": "bullish" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("demand_outlook"));
    }

    #[test]
    fn test_negative_budget_is_invalid_input() {
        let err = evaluate_request_json(r#"{ "scenario": { "annual_budget": "-1" } }"#)
            .unwrap_err();
        match err {
            ScenarioError::InvalidInput { field, .. } => assert_eq!(field, "annual_budget"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
