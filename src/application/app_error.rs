use thiserror::Error;
use waitlist_types::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Notion API error: {status} {status_text}")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
            AppError::Upstream { .. } => ErrorCode::UpstreamError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
