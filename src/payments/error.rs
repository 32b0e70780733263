use thiserror::Error;

pub type ForwardResult<T> = Result<T, ForwardError>;

/// Failure modes of a single outbound delivery attempt.
///
/// None of these escape the forwarder boundary: every variant is normalized
/// into a `success: false` payment outcome before reaching the caller.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    #[error("JamboPay API timeout - please try again")]
    Timeout,

    #[error("Network connection error - please check your connection")]
    Connection,

    #[error("Network error: {message}")]
    Network { message: String },
}

impl ForwardError {
    /// Connection failures are worth retrying against another candidate
    /// endpoint; validation failures never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            ForwardError::Validation { .. } => false,
            ForwardError::Timeout => true,
            ForwardError::Connection => true,
            ForwardError::Network { .. } => true,
        }
    }

    /// Classify a transport-level failure from the HTTP client.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForwardError::Timeout
        } else if err.is_connect() {
            ForwardError::Connection
        } else {
            ForwardError::Network {
                message: err.to_string(),
            }
        }
    }
}
