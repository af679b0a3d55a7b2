pub mod error;
pub mod ratios;
pub mod scenario;
pub mod snapshot;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

pub use error::ScenarioError;
pub use ratios::{compute_ratios, RatioInputs, RatioSet};
pub use scenario::{evaluate, DemandOutlook, OrderFrequency, ScenarioInput};
pub use snapshot::FinancialSnapshot;
pub use types::*;

/// Standard result type for all scenario operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;
