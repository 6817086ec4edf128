use thiserror::Error;

#[derive(Error, Debug)]
pub enum TcoError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vendor '{id}': {reason}")]
    InvalidVendor { id: String, reason: String },

    #[error("Duplicate vendor id '{id}' in catalog")]
    DuplicateVendor { id: String },

    #[error("Scenario run '{run_id}' not found")]
    RunNotFound { run_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TcoResult<T> = Result<T, TcoError>;
