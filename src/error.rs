use thiserror::Error;

/// Errors surfaced by dataset, model-building, and persistence operations.
///
/// Element-wise matrix arithmetic still panics on a shape mismatch; this enum
/// covers the cases a caller can reasonably detect and report.
#[derive(Debug, Error)]
pub enum NnError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("cannot take {n_train} training samples from a dataset of {total}")]
    InvalidSplit { n_train: usize, total: usize },

    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NnError>;
