/// Domain-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input did not conform to a request shape. Surfaced to the caller.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A trusted source broke its contract (e.g. a persisted record missing
    /// a mandatory column). Never a routine client error.
    #[error("Internal error: {0}")]
    Internal(String),
}
