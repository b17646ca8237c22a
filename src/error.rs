//! Error types for dataset loading and configuration.

/// Errors raised while validating a dataset payload.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dye matrix row {row} has {found} coefficients, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("dye matrix has {rows} rows but the dataset lists {channels} channels")]
    ChannelCountMismatch { channels: usize, rows: usize },
    #[error("channel {0:?} is listed more than once")]
    DuplicateChannel(String),
    #[error("dye matrix coefficient at row {row}, column {column} is not finite")]
    NonFiniteCoefficient { row: usize, column: usize },
    #[error("malformed dataset payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading plot configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
