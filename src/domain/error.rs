use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Initial fetch or push subscription failed. The session is unusable.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Operation not allowed in the current lifecycle state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A single record carries data that cannot be interpreted.
    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}
