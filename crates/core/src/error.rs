#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown lead type: {0}")]
    UnknownLeadType(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
