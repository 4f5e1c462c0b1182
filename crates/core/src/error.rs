//! Error types

use thiserror::Error;

/// Errors produced while comparing two fragments
#[derive(Debug, Error)]
pub enum Error {
    /// The markup parser could not read its input
    #[error("failed to parse markup fragment: {0}")]
    Parse(#[from] std::io::Error),

    /// A markup source name other than `before` or `after`
    #[error("invalid markup source {0:?}, expected \"before\" or \"after\"")]
    InvalidMarkupSource(String),

    /// A diff algorithm name that is not known
    #[error("unknown diff algorithm {0:?}, expected \"myers\", \"patience\" or \"lcs\"")]
    UnknownAlgorithm(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
