use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ratios::RatioSet;
use crate::scenario::input::ScenarioInput;
use crate::snapshot::FinancialSnapshot;
use crate::types::Money;
use crate::{ScenarioError, ScenarioResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Baseline figures after the scenario has been applied.
///
/// Cash, receivables, current liabilities and total assets are never
/// scenario-adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedSnapshot {
    pub revenue: Money,
    pub cogs: Money,
    pub inventory: Money,
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub quick_assets: Money,
    pub working_capital: Money,
    pub total_assets: Money,
    pub net_income: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEvaluation {
    pub adjusted: AdjustedSnapshot,
    pub baseline_ratios: RatioSet,
    pub adjusted_ratios: RatioSet,
    /// True when the annual budget, not the baseline, set the inventory level.
    pub budget_binding: bool,
    /// False when baseline revenue is zero and net income was carried over
    /// unscaled.
    pub net_income_scaled: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply a scenario to a baseline snapshot.
///
/// Pure and deterministic: reads only its arguments, returns only values.
/// Fails on a negative annual budget, or when an adjusted figure falls
/// outside the range of `Decimal`.
pub fn evaluate(
    baseline: &FinancialSnapshot,
    scenario: &ScenarioInput,
) -> ScenarioResult<ScenarioEvaluation> {
    scenario.validate()?;

    let demand = scenario.demand_outlook.multiplier();
    let revenue = checked(baseline.revenue.checked_mul(demand), "adjusted revenue")?;
    let cogs = checked(baseline.cogs.checked_mul(demand), "adjusted COGS")?;

    let budget_binding = scenario.annual_budget < baseline.inventory;
    let capped_inventory = baseline.inventory.min(scenario.annual_budget);
    let inventory = checked(
        capped_inventory.checked_mul(scenario.order_frequency.multiplier()),
        "adjusted inventory",
    )?;

    let current_assets = checked(
        baseline
            .cash
            .checked_add(baseline.accounts_receivable)
            .and_then(|v| v.checked_add(inventory)),
        "adjusted current assets",
    )?;
    let current_liabilities = baseline.current_liabilities;
    let total_assets = baseline.total_assets;

    // Zero baseline revenue leaves the scale undefined; keep net income as is.
    let net_income_scaled = !baseline.revenue.is_zero();
    let net_income = if net_income_scaled {
        checked(
            revenue
                .checked_div(baseline.revenue)
                .and_then(|scale| baseline.net_income.checked_mul(scale)),
            "adjusted net income",
        )?
    } else {
        baseline.net_income
    };

    let adjusted = AdjustedSnapshot {
        revenue,
        cogs,
        inventory,
        current_assets,
        current_liabilities,
        quick_assets: checked(
            current_assets.checked_sub(inventory),
            "adjusted quick assets",
        )?,
        working_capital: checked(
            current_assets.checked_sub(current_liabilities),
            "adjusted working capital",
        )?,
        total_assets,
        net_income,
    };

    debug!(
        order_frequency = %scenario.order_frequency,
        demand_outlook = %scenario.demand_outlook,
        annual_budget = %scenario.annual_budget,
        budget_binding,
        adjusted_inventory = %inventory,
        "scenario evaluated"
    );

    Ok(ScenarioEvaluation {
        adjusted,
        baseline_ratios: RatioSet::from_snapshot(baseline),
        adjusted_ratios: RatioSet::from_adjusted(&adjusted),
        budget_binding,
        net_income_scaled,
    })
}

fn checked(value: Option<Decimal>, context: &str) -> ScenarioResult<Decimal> {
    value.ok_or_else(|| ScenarioError::overflow(context))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
