use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{Money, Multiplier};
use crate::{ScenarioError, ScenarioResult};

/// Annual inventory budget used when the caller does not supply one.
pub const DEFAULT_ANNUAL_BUDGET: Money = dec!(100000.00);

// ---------------------------------------------------------------------------
// Order frequency
// ---------------------------------------------------------------------------

/// How often inventory is replenished. More frequent orders keep less
/// stock on hand.
///
/// Serializes as snake_case; deserializes through [`FromStr`], so any
/// casing or separator style is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum OrderFrequency {
    #[default]
    Weekly,
    BiWeekly,
    Monthly,
}

impl OrderFrequency {
    pub const ALL: [OrderFrequency; 3] = [Self::Weekly, Self::BiWeekly, Self::Monthly];

    /// Scale applied to the budget-capped inventory.
    pub fn multiplier(self) -> Multiplier {
        match self {
            Self::Weekly => dec!(0.90),
            Self::BiWeekly => dec!(1.00),
            Self::Monthly => dec!(1.10),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Weekly => "frequent replenishment reduces average inventory (~-10%).",
            Self::BiWeekly => "standard replenishment, neutral effect.",
            Self::Monthly => "less frequent replenishment increases inventory (~+10%).",
        }
    }
}

impl fmt::Display for OrderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::Monthly => "Monthly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for OrderFrequency {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ScenarioError::InvalidInput {
                field: "order_frequency".into(),
                reason: format!("'{s}' is not one of weekly, bi-weekly, monthly"),
            }),
        }
    }
}

impl TryFrom<String> for OrderFrequency {
    type Error = ScenarioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// Demand outlook
// ---------------------------------------------------------------------------

/// Market conditions applied to revenue and COGS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DemandOutlook {
    #[default]
    Pessimistic,
    Baseline,
    Optimistic,
}

impl DemandOutlook {
    pub const ALL: [DemandOutlook; 3] = [Self::Pessimistic, Self::Baseline, Self::Optimistic];

    /// Scale applied to revenue and COGS.
    pub fn multiplier(self) -> Multiplier {
        match self {
            Self::Pessimistic => dec!(0.90),
            Self::Baseline => dec!(1.00),
            Self::Optimistic => dec!(1.10),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Pessimistic => "conservative forecast reduces sales and COGS.",
            Self::Baseline => "neutral, no change.",
            Self::Optimistic => "growth forecast increases sales and COGS.",
        }
    }
}

impl fmt::Display for DemandOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pessimistic => "Pessimistic (-10%)",
            Self::Baseline => "Baseline (0%)",
            Self::Optimistic => "Optimistic (+10%)",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DemandOutlook {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "pessimistic" => Ok(Self::Pessimistic),
            "baseline" => Ok(Self::Baseline),
            "optimistic" => Ok(Self::Optimistic),
            _ => Err(ScenarioError::InvalidInput {
                field: "demand_outlook".into(),
                reason: format!("'{s}' is not one of pessimistic, baseline, optimistic"),
            }),
        }
    }
}

impl TryFrom<String> for DemandOutlook {
    type Error = ScenarioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Lowercase and strip separators so "Bi-weekly", "bi_weekly" and
/// "BiWeekly" compare equal.
fn normalise(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Scenario input
// ---------------------------------------------------------------------------

/// The three user-selected scenario parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(default)]
    pub order_frequency: OrderFrequency,
    /// Cap on inventory spend. Must be non-negative.
    #[serde(default = "default_budget")]
    pub annual_budget: Money,
    #[serde(default)]
    pub demand_outlook: DemandOutlook,
}

fn default_budget() -> Money {
    DEFAULT_ANNUAL_BUDGET
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            order_frequency: OrderFrequency::default(),
            annual_budget: DEFAULT_ANNUAL_BUDGET,
            demand_outlook: DemandOutlook::default(),
        }
    }
}

impl ScenarioInput {
    pub fn new(
        order_frequency: OrderFrequency,
        annual_budget: Money,
        demand_outlook: DemandOutlook,
    ) -> Self {
        Self {
            order_frequency,
            annual_budget,
            demand_outlook,
        }
    }

    pub fn validate(&self) -> ScenarioResult<()> {
        if self.annual_budget < Decimal::ZERO {
            return Err(ScenarioError::InvalidInput {
                field: "annual_budget".into(),
                reason: format!(
                    "Annual budget cannot be negative (got {}).",
                    self.annual_budget
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlook_multipliers() {
        assert_eq!(DemandOutlook::Pessimistic.multiplier(), dec!(0.90));
        assert_eq!(DemandOutlook::Baseline.multiplier(), dec!(1.00));
        assert_eq!(DemandOutlook::Optimistic.multiplier(), dec!(1.10));
    }

    #[test]
    fn test_frequency_multipliers() {
        assert_eq!(OrderFrequency::Weekly.multiplier(), dec!(0.90));
        assert_eq!(OrderFrequency::BiWeekly.multiplier(), dec!(1.00));
        assert_eq!(OrderFrequency::Monthly.multiplier(), dec!(1.10));
    }

    #[test]
    fn test_parse_frequency_variants() {
        for text in ["bi-weekly", "Bi-weekly", "biweekly", "BI_WEEKLY", " BiWeekly "] {
            assert_eq!(text.parse::<OrderFrequency>().unwrap(), OrderFrequency::BiWeekly);
        }
        assert_eq!("Monthly".parse::<OrderFrequency>().unwrap(), OrderFrequency::Monthly);
    }

    #[test]
    fn test_parse_unknown_frequency_rejected() {
        let err = "fortnightly".parse::<OrderFrequency>().unwrap_err();
        match err {
            ScenarioError::InvalidInput { field, .. } => assert_eq!(field, "order_frequency"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_outlook() {
        assert_eq!("optimistic".parse::<DemandOutlook>().unwrap(), DemandOutlook::Optimistic);
        assert!("bullish".parse::<DemandOutlook>().is_err());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(OrderFrequency::BiWeekly.to_string(), "Bi-weekly");
        assert_eq!(DemandOutlook::Optimistic.to_string(), "Optimistic (+10%)");
    }

    #[test]
    fn test_defaults() {
        let input = ScenarioInput::default();
        assert_eq!(input.order_frequency, OrderFrequency::Weekly);
        assert_eq!(input.annual_budget, dec!(100000.00));
        assert_eq!(input.demand_outlook, DemandOutlook::Pessimistic);
    }

    #[test]
    fn test_deserialize_partial_input_fills_defaults() {
        let input: ScenarioInput =
            serde_json::from_str(r#"{ "order_frequency": "bi-weekly" }"#).unwrap();
        assert_eq!(input.order_frequency, OrderFrequency::BiWeekly);
        assert_eq!(input.annual_budget, DEFAULT_ANNUAL_BUDGET);
        assert_eq!(input.demand_outlook, DemandOutlook::Pessimistic);
    }

    #[test]
    fn test_deserialize_mixed_case_variants() {
        for text in ["Weekly", "WEEKLY", "weekly"] {
            let f: OrderFrequency = serde_json::from_value(serde_json::json!(text)).unwrap();
            assert_eq!(f, OrderFrequency::Weekly);
        }
        for text in ["BiWeekly", "Bi-weekly", "bi_weekly", "biweekly"] {
            let f: OrderFrequency = serde_json::from_value(serde_json::json!(text)).unwrap();
            assert_eq!(f, OrderFrequency::BiWeekly);
        }
        let input: ScenarioInput = serde_json::from_str(
            r#"{ "order_frequency": "Monthly", "demand_outlook": "Optimistic" }"#,
        )
        .unwrap();
        assert_eq!(input.order_frequency, OrderFrequency::Monthly);
        assert_eq!(input.demand_outlook, DemandOutlook::Optimistic);
    }

    #[test]
    fn test_deserialize_unknown_variant_names_field() {
        let err = serde_json::from_str::<ScenarioInput>(r#"{ "demand_outlook": "bullish" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("demand_outlook"));
    }

    #[test]
    fn test_serialize_stays_snake_case() {
        let json = serde_json::to_value(ScenarioInput::new(
            OrderFrequency::BiWeekly,
            dec!(1),
            DemandOutlook::Optimistic,
        ))
        .unwrap();
        assert_eq!(json["order_frequency"], "bi_weekly");
        assert_eq!(json["demand_outlook"], "optimistic");
    }

    #[test]
    fn test_negative_budget_rejected() {
        let input = ScenarioInput::new(OrderFrequency::Weekly, dec!(-0.01), DemandOutlook::Baseline);
        let err = input.validate().unwrap_err();
        match err {
            ScenarioError::InvalidInput { field, .. } => assert_eq!(field, "annual_budget"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_budget_accepted() {
        let input = ScenarioInput::new(OrderFrequency::Weekly, Decimal::ZERO, DemandOutlook::Baseline);
        assert!(input.validate().is_ok());
    }
}
