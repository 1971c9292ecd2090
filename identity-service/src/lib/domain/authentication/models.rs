use std::fmt;

use crate::domain::user::models::UserProfile;

/// Command to register a new identity, with raw inputs.
///
/// Fields are validated by the service, not here.
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterCommand {
    pub fn new(email: String, password: String, name: String) -> Self {
        Self {
            email,
            password,
            name,
        }
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Command to log in with raw credentials.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}
