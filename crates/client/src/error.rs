use thiserror::Error;

/// Error type for calls against the ticket API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be decoded.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },
}
