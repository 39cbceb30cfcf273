//! Error types for the Biblioteca console

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Text shown to the user in a notification.
    ///
    /// Server-provided messages are passed through untouched; transport and
    /// decoding failures get a short generic description instead of the
    /// underlying library error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Status { message, .. } => message.clone(),
            AppError::Http(e) if e.is_timeout() => "The API did not answer in time".to_string(),
            AppError::Http(_) => "Could not reach the API".to_string(),
            AppError::MalformedResponse(_) => "The API returned an unexpected response".to_string(),
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the failed call, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
