//! Error types for the diff crate.

/// Errors that can occur during diff operations.
///
/// The engine never recovers from these locally: a collaborator that cannot
/// produce its result aborts the whole comparison.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The text provider could not render a member's body.
    #[error("text unavailable for {member}: {reason}")]
    TextUnavailable { member: String, reason: String },

    /// The list matcher failed to pair two collections.
    #[error("list matching failed: {0}")]
    Matcher(String),

    /// Serialised report data breaks a hunk or member invariant.
    #[error("invalid report data: {0}")]
    InvalidReport(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
