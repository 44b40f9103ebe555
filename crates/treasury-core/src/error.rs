use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TreasuryError {
    fn from(e: serde_json::Error) -> Self {
        TreasuryError::SerializationError(e.to_string())
    }
}
