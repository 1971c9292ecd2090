use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct UserTable {
    users: Vec<User>,
    by_id: HashMap<UserId, usize>,
    by_email: HashMap<EmailAddress, usize>,
}

/// Process-local user store.
///
/// Users and both indexes sit behind one lock, so the uniqueness check and
/// the insert in `add` happen under the same write guard. Listing preserves
/// registration order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: User) -> Result<User, UserError> {
        let mut table = self.table.write().await;

        if table.by_email.contains_key(&user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let index = table.users.len();
        table.by_id.insert(user.id, index);
        table.by_email.insert(user.email.clone(), index);
        table.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email)
            .map(|&index| table.users[index].clone()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let table = self.table.read().await;
        Ok(table.by_id.get(id).map(|&index| table.users[index].clone()))
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, UserError> {
        let table = self.table.read().await;
        Ok(table.users.iter().map(User::profile).collect())
    }
}
