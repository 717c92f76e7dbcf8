use thiserror::Error;

/// Failure taxonomy for backend calls.
///
/// `Transport` and `Malformed` are both "the network let us down" as far as
/// the user is concerned; `Rejected` means the server answered and said no.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// True for failures the user should read as a connectivity problem.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Malformed(_))
    }

    /// User-facing message: the server's own words for rejections, a generic
    /// retry hint for everything else.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) => message.clone(),
            _ => "Network error. Please try again.".to_string(),
        }
    }
}

/// Errors raised by the report exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no records to export")]
    Empty,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to save report: {0}")]
    Io(#[from] std::io::Error),
}
