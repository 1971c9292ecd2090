use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid password input: {0}")]
    InvalidInput(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// A password rejected by a [`PasswordPolicy`](super::PasswordPolicy).
///
/// The message is meant to be shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct PolicyViolation {
    pub message: String,
}
