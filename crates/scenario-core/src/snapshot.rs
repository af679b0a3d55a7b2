use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;
use crate::{ScenarioError, ScenarioResult};

/// Point-in-time financial position the scenarios are applied to.
///
/// Fields are taken as supplied: current assets need not equal
/// cash + receivables + inventory, and negative values flow through the
/// arithmetic unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub revenue: Money,
    pub cogs: Money,
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub inventory: Money,
    pub cash: Money,
    pub accounts_receivable: Money,
    /// May be negative (net loss).
    pub net_income: Money,
    pub total_assets: Money,
}

impl FinancialSnapshot {
    /// The 2025 projection used when no baseline override is supplied.
    pub fn reference() -> Self {
        Self {
            revenue: dec!(2245891597.48),
            cogs: dec!(753400000.00),
            current_assets: dec!(1380508243.96),
            current_liabilities: dec!(776610441.78),
            inventory: dec!(418161077.55),
            cash: dec!(229873783.64),
            accounts_receivable: dec!(650803975.71),
            net_income: dec!(43895489.22),
            total_assets: dec!(2255221580.02),
        }
    }

    /// Current assets less current liabilities.
    pub fn working_capital(&self) -> ScenarioResult<Money> {
        self.current_assets
            .checked_sub(self.current_liabilities)
            .ok_or_else(|| ScenarioError::overflow("baseline working capital"))
    }

    /// Current assets less inventory.
    pub fn quick_assets(&self) -> ScenarioResult<Money> {
        self.current_assets
            .checked_sub(self.inventory)
            .ok_or_else(|| ScenarioError::overflow("baseline quick assets"))
    }
}

impl Default for FinancialSnapshot {
    fn default() -> Self {
        Self::reference()
    }
}
