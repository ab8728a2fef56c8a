//! Error types for rs-readability-img.
//!
//! Extraction itself never fails: markup anomalies recover locally and an
//! unreadable page degrades to a placeholder result. Errors only cover bad
//! caller input.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page URL given in the options could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A caller-supplied pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
