use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use auth::HashedPassword;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use auth::TokenService;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::errors::EMAIL_ALREADY_REGISTERED;
use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

const DECOY_PASSWORD: &str = "decoy-password-0";

/// Register and login orchestration.
///
/// Composes the credential hasher, the token service and the injected user
/// store. Only `register` writes to the store, with a single insert.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
    password_policy: PasswordPolicy,
    decoy_hash: Arc<OnceLock<Option<HashedPassword>>>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create an auth service with the default hasher and password policy.
    ///
    /// # Arguments
    /// * `repository` - User store implementation
    /// * `tokens` - Token service holding the process-wide signing key
    pub fn new(repository: Arc<UR>, tokens: Arc<TokenService>) -> Self {
        Self {
            repository,
            tokens,
            password_hasher: PasswordHasher::new(),
            password_policy: PasswordPolicy::default(),
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = Arc::new(OnceLock::new());
        self
    }

    pub fn with_password_policy(mut self, password_policy: PasswordPolicy) -> Self {
        self.password_policy = password_policy;
        self
    }

    fn issue_session(&self, user: &User) -> Result<AuthSession, AuthError> {
        let token = self.tokens.issue(&user.token_subject())?;

        Ok(AuthSession {
            user: user.profile(),
            token,
        })
    }

    /// Argon2 is CPU bound; it runs on the blocking pool, off the async workers.
    async fn hash_password(&self, password: String) -> Result<HashedPassword, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify_password(
        &self,
        password: String,
        hash: HashedPassword,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }

    /// Spend one verification on a fixed hash so an unknown email costs
    /// about as much as a wrong password.
    async fn verify_against_decoy(&self, password: String) {
        let hasher = self.password_hasher.clone();
        let decoy_hash = Arc::clone(&self.decoy_hash);

        let result = tokio::task::spawn_blocking(move || {
            let decoy = decoy_hash.get_or_init(|| hasher.hash(DECOY_PASSWORD).ok());
            if let Some(hash) = decoy {
                let _ = hasher.verify(&password, hash);
            }
        })
        .await;

        if let Err(e) = result {
            tracing::warn!(error = %e, "Decoy verification task failed");
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if command.email.is_empty() || command.password.is_empty() || command.name.is_empty() {
            return Err(AuthError::Validation(
                "Email, password, and name are required".to_string(),
            ));
        }

        let email = EmailAddress::new(command.email)?;
        self.password_policy.validate(&command.password)?;
        let name = DisplayName::new(command.name)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::debug!("registration rejected: email already registered");
            return Err(AuthError::Conflict(EMAIL_ALREADY_REGISTERED.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email,
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        // A concurrent registration may still win the insert; the store
        // reports it as EmailAlreadyExists, which maps to Conflict.
        let created_user = self.repository.add(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        self.issue_session(&created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        if command.email.is_empty() || command.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let email = EmailAddress::new(command.email)?;

        let Some(user) = self.repository.find_by_email(&email).await? else {
            self.verify_against_decoy(command.password).await;
            tracing::debug!("login rejected");
            return Err(AuthError::invalid_credentials());
        };

        if !self
            .verify_password(command.password, user.password_hash.clone())
            .await?
        {
            tracing::debug!(user_id = %user.id, "login rejected");
            return Err(AuthError::invalid_credentials());
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.issue_session(&user)
    }
}
