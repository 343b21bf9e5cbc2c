use thiserror::Error;

/// Why the custom date range cannot be applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Please select both start and end dates")]
    Incomplete,
    #[error("End date must be after start date")]
    EndBeforeStart,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid fixture document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown activity kind: {0}")]
    UnknownKind(String),
    #[error("read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    InvalidDocument {
        path: String,
        source: serde_json::Error,
    },
}
