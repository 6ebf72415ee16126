use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendSightError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invariant violated for {record}: {reason}")]
    InvariantViolation { record: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LendSightError {
    fn from(e: serde_json::Error) -> Self {
        LendSightError::SerializationError(e.to_string())
    }
}
