use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::scenario::engine::AdjustedSnapshot;
use crate::snapshot::FinancialSnapshot;
use crate::types::{Money, Ratio};

/// The balance-sheet and income figures a [`RatioSet`] is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioInputs {
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub inventory: Money,
    pub net_income: Money,
    pub revenue: Money,
    pub total_assets: Money,
}

/// Liquidity and profitability ratios for one snapshot.
///
/// A ratio is `None` when its denominator is exactly zero, or when the
/// quotient falls outside the range of `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    pub current_ratio: Ratio,
    pub quick_ratio: Ratio,
    pub working_capital_ratio: Ratio,
    pub net_profit_margin: Ratio,
}

impl RatioSet {
    pub fn from_snapshot(s: &FinancialSnapshot) -> Self {
        compute_ratios(&RatioInputs {
            current_assets: s.current_assets,
            current_liabilities: s.current_liabilities,
            inventory: s.inventory,
            net_income: s.net_income,
            revenue: s.revenue,
            total_assets: s.total_assets,
        })
    }

    pub fn from_adjusted(a: &AdjustedSnapshot) -> Self {
        compute_ratios(&RatioInputs {
            current_assets: a.current_assets,
            current_liabilities: a.current_liabilities,
            inventory: a.inventory,
            net_income: a.net_income,
            revenue: a.revenue,
            total_assets: a.total_assets,
        })
    }

    /// Ratios paired with their display names, in table order.
    pub fn named(&self) -> [(&'static str, Ratio); 4] {
        [
            ("Current Ratio", self.current_ratio),
            ("Quick Ratio", self.quick_ratio),
            ("Working Capital Ratio", self.working_capital_ratio),
            ("Net Profit Margin", self.net_profit_margin),
        ]
    }

    pub fn has_undefined(&self) -> bool {
        self.named().iter().any(|(_, r)| r.is_none())
    }
}

/// Current, quick, working-capital and net-margin ratios.
pub fn compute_ratios(i: &RatioInputs) -> RatioSet {
    RatioSet {
        current_ratio: ratio(Some(i.current_assets), i.current_liabilities),
        quick_ratio: ratio(
            i.current_assets.checked_sub(i.inventory),
            i.current_liabilities,
        ),
        working_capital_ratio: ratio(
            i.current_assets.checked_sub(i.current_liabilities),
            i.total_assets,
        ),
        net_profit_margin: ratio(Some(i.net_income), i.revenue),
    }
}

fn ratio(numerator: Option<Decimal>, denominator: Decimal) -> Ratio {
    if denominator.is_zero() {
        return None;
    }
    numerator?.checked_div(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> RatioInputs {
        RatioInputs {
            current_assets: dec!(300_000),
            current_liabilities: dec!(150_000),
            inventory: dec!(60_000),
            net_income: dec!(50_000),
            revenue: dec!(1_000_000),
            total_assets: dec!(1_200_000),
        }
    }

    #[test]
    fn test_basic_ratios() {
        let r = compute_ratios(&sample());
        assert_eq!(r.current_ratio, Some(dec!(2)));
        // (300k - 60k) / 150k = 1.6
        assert_eq!(r.quick_ratio, Some(dec!(1.6)));
        // 150k / 1.2M = 0.125
        assert_eq!(r.working_capital_ratio, Some(dec!(0.125)));
        assert_eq!(r.net_profit_margin, Some(dec!(0.05)));
    }

    #[test]
    fn test_zero_liabilities_undefined() {
        let mut i = sample();
        i.current_liabilities = Decimal::ZERO;
        let r = compute_ratios(&i);
        assert_eq!(r.current_ratio, None);
        assert_eq!(r.quick_ratio, None);
        // WC ratio still defined: 300k / 1.2M
        assert_eq!(r.working_capital_ratio, Some(dec!(0.25)));
        assert!(r.has_undefined());
    }

    #[test]
    fn test_zero_total_assets_and_revenue_undefined() {
        let mut i = sample();
        i.total_assets = Decimal::ZERO;
        i.revenue = Decimal::ZERO;
        let r = compute_ratios(&i);
        assert_eq!(r.working_capital_ratio, None);
        assert_eq!(r.net_profit_margin, None);
        assert!(r.current_ratio.is_some());
    }

    #[test]
    fn test_zero_numerator_is_not_undefined() {
        let mut i = sample();
        i.net_income = Decimal::ZERO;
        let r = compute_ratios(&i);
        assert_eq!(r.net_profit_margin, Some(Decimal::ZERO));
        assert!(!r.has_undefined());
    }

    #[test]
    fn test_negative_net_income_gives_negative_margin() {
        let mut i = sample();
        i.net_income = dec!(-20_000);
        assert_eq!(compute_ratios(&i).net_profit_margin, Some(dec!(-0.02)));
    }

    #[test]
    fn test_out_of_range_quotient_undefined() {
        let mut i = sample();
        i.current_assets = dec!(100000000000000000000);
        i.current_liabilities = dec!(0.0000000001);
        let r = compute_ratios(&i);
        assert_eq!(r.current_ratio, None);
        assert_eq!(r.quick_ratio, None);
        assert!(r.working_capital_ratio.is_some());
    }

    #[test]
    fn test_out_of_range_numerator_undefined() {
        let mut i = sample();
        i.current_assets = Decimal::MAX;
        i.inventory = Decimal::MIN;
        assert_eq!(compute_ratios(&i).quick_ratio, None);
    }

    #[test]
    fn test_undefined_serializes_as_null() {
        let mut i = sample();
        i.current_liabilities = Decimal::ZERO;
        let v = serde_json::to_value(compute_ratios(&i)).unwrap();
        assert!(v["current_ratio"].is_null());
        assert!(!v["net_profit_margin"].is_null());
    }
}
