// errors.rs
use crate::backend::BackendError;
use crate::domain::wizard::WizardError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, backend).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] WizardError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal Server Error")]
    InternalError,
}
