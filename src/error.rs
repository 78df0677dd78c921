use thiserror::Error;

/// Failure reported by a result store.
///
/// Callers retry `Transient`, decide case by case on `Integrity`, and let
/// `Unexpected` propagate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Transient store error: {0}")]
    Transient(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Unexpected store error: {0}")]
    Unexpected(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

#[derive(Error, Debug)]
pub enum GapError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Task statistics unavailable for task {task_id}: {reason}")]
    AggregationUnavailable { task_id: u32, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type GapResult<T> = Result<T, GapError>;
