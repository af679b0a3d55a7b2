use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::report::notes::ReportNotes;
use crate::scenario::engine::{evaluate, ScenarioEvaluation};
use crate::scenario::input::{DemandOutlook, OrderFrequency, ScenarioInput};
use crate::snapshot::FinancialSnapshot;
use crate::types::*;
use crate::ScenarioResult;

/// Decimal places shown in rendered tables.
pub const DISPLAY_DP: u32 = 2;

/// Precision at which baseline and adjusted ratios are compared, so equal
/// quotients reached through different divisions read as unchanged.
const MOVEMENT_DP: u32 = 10;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub metric: String,
    pub baseline: Money,
    pub adjusted: Money,
}

/// Direction of a ratio from baseline to adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Up,
    Down,
    Unchanged,
    /// One side of the comparison has no value.
    Undefined,
}

impl Movement {
    fn between(baseline: Ratio, adjusted: Ratio) -> Self {
        let baseline = baseline.map(|b| b.round_dp(MOVEMENT_DP));
        let adjusted = adjusted.map(|a| a.round_dp(MOVEMENT_DP));
        match (baseline, adjusted) {
            (Some(b), Some(a)) if a > b => Self::Up,
            (Some(b), Some(a)) if a < b => Self::Down,
            (Some(_), Some(_)) => Self::Unchanged,
            _ => Self::Undefined,
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Unchanged => "=",
            Self::Undefined => "n/a",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioRow {
    pub ratio: String,
    pub baseline: Ratio,
    pub adjusted: Ratio,
    pub movement: Movement,
}

/// The scenario as applied, with labels and the multipliers it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub order_frequency: OrderFrequency,
    pub order_frequency_label: String,
    pub order_frequency_multiplier: Multiplier,
    pub annual_budget: Money,
    pub budget_binding: bool,
    pub demand_outlook: DemandOutlook,
    pub demand_outlook_label: String,
    pub demand_outlook_multiplier: Multiplier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: ScenarioSummary,
    /// Baseline vs adjusted figures, in display order.
    pub metrics: Vec<MetricRow>,
    /// Baseline vs adjusted ratios, in display order.
    pub ratios: Vec<RatioRow>,
    pub notes: ReportNotes,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a scenario and lay the result out as the metric and ratio
/// comparison tables.
pub fn build_report(
    baseline: &FinancialSnapshot,
    scenario: &ScenarioInput,
) -> ScenarioResult<ComputationOutput<ScenarioReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let eval = evaluate(baseline, scenario)?;

    if eval.budget_binding {
        warnings.push(format!(
            "Annual budget {} is below baseline inventory {}; inventory is capped at the budget.",
            scenario.annual_budget, baseline.inventory
        ));
    }
    if !eval.net_income_scaled {
        warnings.push("Baseline revenue is zero; net income carried over unscaled.".into());
    }

    for w in &warnings {
        tracing::debug!("{}", w);
    }

    let ratios = ratio_rows(&eval);
    for row in ratios.iter().filter(|r| r.movement == Movement::Undefined) {
        let w = format!(
            "{} is undefined (zero denominator or out of range) in at least one column.",
            row.ratio
        );
        tracing::warn!(ratio = %row.ratio, "{}", w);
        warnings.push(w);
    }

    let report = ScenarioReport {
        scenario: ScenarioSummary {
            order_frequency: scenario.order_frequency,
            order_frequency_label: scenario.order_frequency.to_string(),
            order_frequency_multiplier: scenario.order_frequency.multiplier(),
            annual_budget: scenario.annual_budget,
            budget_binding: eval.budget_binding,
            demand_outlook: scenario.demand_outlook,
            demand_outlook_label: scenario.demand_outlook.to_string(),
            demand_outlook_multiplier: scenario.demand_outlook.multiplier(),
        },
        metrics: metric_rows(baseline, &eval)?,
        ratios,
        notes: ReportNotes::standard(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "inventory": "min(baseline inventory, annual budget) x order-frequency multiplier",
        "current_assets": "baseline cash + baseline receivables + adjusted inventory",
        "pass_through": ["current_liabilities", "total_assets"],
        "net_income": "baseline net income x (adjusted revenue / baseline revenue)",
        "undefined_ratio": "null when the denominator is zero or the quotient is out of range",
    });

    Ok(with_metadata(
        "Inventory & demand what-if (single-period baseline adjustment)",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

/// Round a figure for display: two places, halves away from zero.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a ratio to two places, or "n/a" when undefined.
pub fn format_ratio(value: Ratio) -> String {
    match value {
        Some(v) => format!("{:.2}", round_display(v)),
        None => "n/a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn metric_rows(
    baseline: &FinancialSnapshot,
    eval: &ScenarioEvaluation,
) -> ScenarioResult<Vec<MetricRow>> {
    let a = &eval.adjusted;
    let row = |metric: &str, baseline: Money, adjusted: Money| MetricRow {
        metric: metric.into(),
        baseline,
        adjusted,
    };
    Ok(vec![
        row("Revenue", baseline.revenue, a.revenue),
        row("COGS", baseline.cogs, a.cogs),
        row("Inventory", baseline.inventory, a.inventory),
        row("Current Assets", baseline.current_assets, a.current_assets),
        row("Current Liabilities", baseline.current_liabilities, a.current_liabilities),
        row("Working Capital", baseline.working_capital()?, a.working_capital),
        row("Quick Assets", baseline.quick_assets()?, a.quick_assets),
        row("Total Assets", baseline.total_assets, a.total_assets),
        row("Net Income", baseline.net_income, a.net_income),
    ])
}

fn ratio_rows(eval: &ScenarioEvaluation) -> Vec<RatioRow> {
    eval.baseline_ratios
        .named()
        .into_iter()
        .zip(eval.adjusted_ratios.named())
        .map(|((name, baseline), (_, adjusted))| RatioRow {
            ratio: name.to_string(),
            baseline,
            adjusted,
            movement: Movement::between(baseline, adjusted),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
