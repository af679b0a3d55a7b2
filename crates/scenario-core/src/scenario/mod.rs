pub mod engine;
pub mod input;

pub use engine::{evaluate, AdjustedSnapshot, ScenarioEvaluation};
pub use input::{DemandOutlook, OrderFrequency, ScenarioInput, DEFAULT_ANNUAL_BUDGET};
