use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

/// Port for read-only user queries.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StorageError` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<UserProfile, UserError>;

    /// Retrieve every registered user.
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must make `add` an atomic unique insert keyed by the
/// normalized email: two concurrent adds with the same email can never both
/// succeed.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StorageError` - Store operation failed
    async fn add(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage, without credentials.
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn list_all(&self) -> Result<Vec<UserProfile>, UserError>;
}
