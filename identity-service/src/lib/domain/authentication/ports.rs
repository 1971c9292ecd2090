use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;

/// Port for the state-changing authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Raw email, password and display name
    ///
    /// # Returns
    /// The new user (without hash) and an access token
    ///
    /// # Errors
    /// * `Validation` - Missing field, malformed email or name, weak password
    /// * `Conflict` - Email is already registered
    /// * `Internal` - Hashing, storage or signing failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Check credentials and issue a token.
    ///
    /// Never mutates the store.
    ///
    /// # Errors
    /// * `Validation` - Missing field or malformed email
    /// * `Unauthorized` - Unknown email or wrong password (same message)
    /// * `Internal` - Storage or signing failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;
}
