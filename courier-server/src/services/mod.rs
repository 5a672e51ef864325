pub mod contact_service;
pub mod conversation_service;
pub mod message_service;
pub mod send_pipeline;
pub mod user_service;

use thiserror::Error;

pub use contact_service::ContactService;
pub use conversation_service::ConversationService;
pub use message_service::MessageService;
pub use send_pipeline::SendPipeline;
pub use user_service::UserService;

/// Failure taxonomy shared by the service layer.
///
/// Validation errors are raised before any mutation; `Database` wraps
/// storage failures and surfaces as an internal error at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
