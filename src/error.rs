use thiserror::Error;

/// Hard failures of a reconciliation run.
///
/// Only [`SyncError::Schema`] can come out of the batch itself; the other
/// variants belong to loading inputs and writing exports. Row-level problems
/// are reported through [`Diagnostics`](crate::engine::Diagnostics) instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("input is missing required column '{column}' (case-insensitive)")]
    Schema { column: String },

    #[error("invalid template: {0}")]
    Template(String),

    #[error("team '{0}' is not present in any loaded record")]
    UnknownTeam(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SyncError {
    pub fn schema(column: impl Into<String>) -> Self {
        SyncError::Schema {
            column: column.into(),
        }
    }
}
