/// Domain failures shared by the API handlers.
///
/// `Validation` is the caller's fault and its message is shown to them
/// verbatim. `Internal` messages are logged and never leave the server.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A listing submission was rejected (for example, no image attached).
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
