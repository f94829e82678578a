// taskcli/src/error.rs

use thiserror::Error;

/// Failure of a task-service operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No stored session, or the stored one has expired. No request was sent.
    #[error("not logged in")]
    NoSession,
    /// Transport, decoding or server-reported failure, already normalized.
    #[error("{0}")]
    Api(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("could not determine the home directory; set TASKCLI_STATE_DIR")]
    NoHomeDir,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Rejected filter/sort input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {field}: {value:?}")]
pub struct QueryError {
    pub field: &'static str,
    pub value: String,
}
