//! Error types for the merge crate.

use redline_types::TypeError;

/// Errors raised while configuring the merge engine or loading its inputs.
///
/// The merge itself is total; these only guard its preconditions.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The similarity threshold must be a number in `[0, 1]`.
    #[error("invalid similarity threshold {0}: expected a value in [0, 1]")]
    InvalidThreshold(f64),

    /// The configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// An input document was malformed.
    #[error("document error: {0}")]
    Document(#[from] TypeError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
