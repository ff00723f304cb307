use crate::storage::StoreError;
use thiserror::Error;

/// Failure of a single request. Every variant is terminal: nothing is retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field was absent. Carries the wire error code.
    #[error("missing required field ({0})")]
    Validation(&'static str),
    #[error("email is already registered")]
    Conflict,
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Carries the wire error code.
    #[error("not found ({0})")]
    NotFound(&'static str),
    #[error("admin flag missing or wrong")]
    Forbidden,
    /// The request body was JSON of the wrong shape, or not JSON at all.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("failed to sign session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("failed to hash password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServiceError {
    /// Short machine-readable code returned in the `error` field of responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(code) | Self::NotFound(code) => *code,
            Self::Conflict => "exists",
            Self::InvalidCredentials => "invalid",
            Self::Forbidden => "forbidden",
            Self::MalformedBody(_) => "invalid_json",
            Self::Storage(_) | Self::Token(_) | Self::PasswordHash(_) | Self::Task(_) => "internal",
        }
    }

    /// True for faults the caller did not cause.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Token(_) | Self::PasswordHash(_) | Self::Task(_)
        )
    }
}
