use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Longest password accepted for hashing, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// A stored password hash in PHC string format.
///
/// Algorithm, parameters and salt are embedded in the string. The value is
/// deliberately not `Serialize` and its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a PHC string loaded from storage.
    ///
    /// No parsing happens here; a malformed value simply never verifies.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id with a
/// fixed cost).
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the production cost parameters.
    ///
    /// # Returns
    /// PasswordHasher instance configured with Argon2id defaults
    /// (19 MiB memory, 2 iterations, 1 lane)
    pub fn new() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// Only hashes produced by `hash` use these parameters; `verify` always
    /// honours the parameters embedded in the stored hash.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty or longer than [`MAX_PASSWORD_BYTES`]
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::InvalidInput(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| HashedPassword(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Never fails: a malformed hash, an out-of-range password and a plain
    /// mismatch all yield `false`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hashed` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hashed: &HashedPassword) -> bool {
        if password.is_empty() || password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        let Ok(parsed_hash) = PasswordHash::new(hashed.as_str()) else {
            tracing::debug!("stored password hash is not a valid PHC string");
            return false;
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(Params::new(Params::MIN_M_COST, 1, 1, None).unwrap())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password1";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.as_str().starts_with("$argon2id$"));

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password1", &hash));
    }

    #[test]
    fn test_default_hasher_round_trip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").expect("Failed to hash password");

        assert!(hash.as_str().contains("m=19456,t=2,p=1"));
        assert!(hasher.verify("password123", &hash));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let hasher = cheap_hasher();

        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first));
        assert!(hasher.verify("password123", &second));
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let hash = cheap_hasher().hash("password123").unwrap();
        assert!(PasswordHasher::new().verify("password123", &hash));
    }

    #[test]
    fn test_hash_rejects_empty_password() {
        let result = cheap_hasher().hash("");
        assert!(matches!(result, Err(PasswordError::InvalidInput(_))));
    }

    #[test]
    fn test_hash_rejects_oversized_password() {
        let password = "a1".repeat(MAX_PASSWORD_BYTES);
        let result = cheap_hasher().hash(&password);
        assert!(matches!(result, Err(PasswordError::InvalidInput(_))));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap_hasher();
        assert!(!hasher.verify("password", &HashedPassword::from_phc("invalid_hash")));
        assert!(!hasher.verify("password", &HashedPassword::from_phc("")));
    }

    #[test]
    fn test_verify_empty_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("password123").unwrap();
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_debug_is_redacted() {
        let hash = cheap_hasher().hash("password123").unwrap();
        let debug = format!("{:?}", hash);
        assert!(!debug.contains("argon2"));
    }
}
