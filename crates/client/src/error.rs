/// Errors from the storefront's side of the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (network, DNS, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `message` is the `error`
    /// field of the JSON body when there was one.
    #[error("Server error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// A 2xx response whose body was not the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Input rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A configured base URL could not be parsed.
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
