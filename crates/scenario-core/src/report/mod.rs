pub mod comparison;
pub mod notes;
pub mod request;

pub use comparison::{
    build_report, format_ratio, round_display, MetricRow, Movement, RatioRow, ScenarioReport,
    ScenarioSummary,
};
pub use notes::{Note, RatioNote, ReportNotes};
pub use request::{evaluate_request_json, ScenarioRequest};
