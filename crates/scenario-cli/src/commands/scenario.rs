use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::info;

use scenario_core::report;
use scenario_core::scenario::{DemandOutlook, OrderFrequency, ScenarioInput};
use scenario_core::{with_metadata, FinancialSnapshot, Money, Ratio, RatioSet};

use crate::input;

/// Arguments for scenario evaluation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EvaluateArgs {
    /// Path to JSON scenario file (individual flags override its fields)
    #[arg(long)]
    pub input: Option<String>,

    /// Reorder frequency: weekly, bi-weekly, monthly
    #[arg(long)]
    pub order_frequency: Option<OrderFrequency>,

    /// Annual inventory budget
    #[arg(long)]
    pub budget: Option<Decimal>,

    /// Demand outlook: pessimistic, baseline, optimistic
    #[arg(long)]
    pub demand_outlook: Option<DemandOutlook>,

    /// Baseline snapshot file (.json, .yaml or .yml); defaults to the 2025 projection
    #[arg(long)]
    pub baseline: Option<String>,
}

impl EvaluateArgs {
    fn has_overrides(&self) -> bool {
        self.order_frequency.is_some() || self.budget.is_some() || self.demand_outlook.is_some()
    }
}

/// Arguments for showing the baseline
#[derive(Args)]
pub struct BaselineArgs {
    /// Baseline snapshot file (.json, .yaml or .yml); defaults to the 2025 projection
    #[arg(long)]
    pub baseline: Option<String>,
}

#[derive(Debug, Serialize)]
struct BaselineView {
    metrics: Vec<BaselineMetric>,
    ratios: Vec<BaselineRatio>,
}

#[derive(Debug, Serialize)]
struct BaselineMetric {
    metric: String,
    baseline: Money,
}

#[derive(Debug, Serialize)]
struct BaselineRatio {
    ratio: String,
    baseline: Ratio,
}

fn load_baseline(path: Option<&str>) -> Result<FinancialSnapshot, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let snapshot: FinancialSnapshot = input::file::read_config(path)?;
            info!(path, "loaded baseline snapshot");
            Ok(snapshot)
        }
        None => Ok(FinancialSnapshot::reference()),
    }
}

fn resolve_scenario(args: &EvaluateArgs) -> Result<ScenarioInput, Box<dyn std::error::Error>> {
    let mut scenario: ScenarioInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if args.has_overrides() {
        ScenarioInput::default()
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScenarioInput::default()
    };

    if let Some(f) = args.order_frequency {
        scenario.order_frequency = f;
    }
    if let Some(b) = args.budget {
        scenario.annual_budget = b;
    }
    if let Some(d) = args.demand_outlook {
        scenario.demand_outlook = d;
    }
    Ok(scenario)
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let baseline = load_baseline(args.baseline.as_deref())?;
    let scenario = resolve_scenario(&args)?;
    let result = report::build_report(&baseline, &scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_baseline(args: BaselineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let baseline = load_baseline(args.baseline.as_deref())?;

    let metric = |name: &str, value: Money| BaselineMetric {
        metric: name.into(),
        baseline: value,
    };
    let view = BaselineView {
        metrics: vec![
            metric("Revenue", baseline.revenue),
            metric("COGS", baseline.cogs),
            metric("Inventory", baseline.inventory),
            metric("Cash", baseline.cash),
            metric("Accounts Receivable", baseline.accounts_receivable),
            metric("Current Assets", baseline.current_assets),
            metric("Current Liabilities", baseline.current_liabilities),
            metric("Working Capital", baseline.working_capital()?),
            metric("Quick Assets", baseline.quick_assets()?),
            metric("Total Assets", baseline.total_assets),
            metric("Net Income", baseline.net_income),
        ],
        ratios: RatioSet::from_snapshot(&baseline)
            .named()
            .into_iter()
            .map(|(name, value)| BaselineRatio {
                ratio: name.into(),
                baseline: value,
            })
            .collect(),
    };

    let source = args.baseline.as_deref().unwrap_or("reference 2025 projection");
    let output = with_metadata(
        "Baseline snapshot",
        &serde_json::json!({ "source": source }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        view,
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            input: None,
            order_frequency: Some(OrderFrequency::Monthly),
            budget: None,
            demand_outlook: None,
            baseline: None,
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut a = args();
        a.budget = Some(dec!(2500));
        let s = resolve_scenario(&a).unwrap();
        assert_eq!(s.order_frequency, OrderFrequency::Monthly);
        assert_eq!(s.annual_budget, dec!(2500));
        assert_eq!(s.demand_outlook, DemandOutlook::Pessimistic);
    }

    #[test]
    fn test_run_evaluate_rejects_negative_budget() {
        let mut a = args();
        a.budget = Some(dec!(-5));
        let err = run_evaluate(a).unwrap_err();
        assert!(err.to_string().contains("annual_budget"));
    }

    #[test]
    fn test_run_baseline_lists_ratios() {
        let v = run_baseline(BaselineArgs { baseline: None }).unwrap();
        let ratios = v["result"]["ratios"].as_array().unwrap();
        assert_eq!(ratios.len(), 4);
        assert_eq!(ratios[3]["ratio"], "Net Profit Margin");
    }
}
