use serde::{Deserialize, Serialize};

use crate::scenario::input::{DemandOutlook, OrderFrequency};

/// Explanatory text that accompanies the comparison tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNotes {
    pub scenarios: Vec<Note>,
    pub ratios: Vec<RatioNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub lines: Vec<String>,
}

/// What a rise or fall in one ratio signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioNote {
    pub ratio: String,
    pub increase: String,
    pub decrease: String,
}

impl ReportNotes {
    pub fn standard() -> Self {
        Self {
            scenarios: scenario_notes(),
            ratios: ratio_notes(),
        }
    }
}

fn scenario_notes() -> Vec<Note> {
    vec![
        Note {
            title: "How often do you order?".into(),
            lines: OrderFrequency::ALL
                .iter()
                .map(|f| format!("{}: {}", f, f.description()))
                .collect(),
        },
        Note {
            title: "Annual budget for inventory".into(),
            lines: vec![
                "Sets the maximum amount you can invest in inventory, capping stock levels.".into(),
            ],
        },
        Note {
            title: "Demand outlook".into(),
            lines: DemandOutlook::ALL
                .iter()
                .map(|d| format!("{}: {}", d, d.description()))
                .collect(),
        },
    ]
}

fn ratio_notes() -> Vec<RatioNote> {
    let note = |ratio: &str, increase: &str, decrease: &str| RatioNote {
        ratio: ratio.into(),
        increase: increase.into(),
        decrease: decrease.into(),
    };
    vec![
        note(
            "Current Ratio",
            "more liquidity buffer",
            "tighter short-term debt coverage",
        ),
        note(
            "Quick Ratio",
            "stronger immediate liquidity",
            "more reliance on inventory",
        ),
        note(
            "Working Capital Ratio",
            "greater operational cushion",
            "potential cash flow strain",
        ),
        note(
            "Net Profit Margin",
            "higher profitability per unit of revenue",
            "increased cost pressure",
        ),
    ]
}
