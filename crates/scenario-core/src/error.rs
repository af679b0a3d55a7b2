use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ScenarioError {
    pub(crate) fn overflow(context: &str) -> Self {
        ScenarioError::ArithmeticOverflow {
            context: context.to_string(),
        }
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(e: serde_json::Error) -> Self {
        ScenarioError::SerializationError(e.to_string())
    }
}
