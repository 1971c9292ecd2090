use auth::JwtError;
use auth::PasswordError;
use auth::PolicyViolation;
use thiserror::Error;

use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::UserError;

/// Shared by the unknown-email and wrong-password paths of login.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub const EMAIL_ALREADY_REGISTERED: &str = "User with this email already exists";

pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";

/// Errors surfaced by the register and login flows.
///
/// Messages of the first three variants are safe to show to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::Unauthorized(INVALID_CREDENTIALS.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(_: EmailError) -> Self {
        AuthError::Validation(INVALID_EMAIL_FORMAT.to_string())
    }
}

impl From<DisplayNameError> for AuthError {
    fn from(err: DisplayNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PolicyViolation> for AuthError {
    fn from(violation: PolicyViolation) -> Self {
        AuthError::Validation(violation.message)
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::InvalidInput(_) => AuthError::Validation(err.to_string()),
            PasswordError::HashingFailed(_) => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::MissingSigningKey => AuthError::Config(err.to_string()),
            JwtError::EncodingFailed(_) | JwtError::InvalidToken => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => {
                AuthError::Conflict(EMAIL_ALREADY_REGISTERED.to_string())
            }
            UserError::NotFound(_) | UserError::StorageError(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}
