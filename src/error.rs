//! Errors raised by the remote collaborators.

/// Failure talking to the task or auth service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the response envelope.
        message: String,
    },
    /// There is no usable session; the user has to log in again.
    #[error("Please login")]
    LoginRequired,
    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}
