//! Authentication core library
//!
//! Framework-free building blocks for the identity service:
//! - Password hashing (Argon2id) and a swappable password policy
//! - JWT access token issuance and verification, bearer header parsing
//! - The access gate: a per-request allow/deny/redirect decision
//!
//! Nothing here performs I/O; the service wires these into its HTTP layer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("password123").unwrap();
//! assert!(hasher.verify("password123", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenService, TokenSubject};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", chrono::Duration::hours(24)).unwrap();
//! let subject = TokenSubject {
//!     id: "user123".to_string(),
//!     email: "alice@example.com".to_string(),
//!     name: "Alice".to_string(),
//! };
//! let token = tokens.issue(&subject).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.subject(), subject);
//! ```
//!
//! ## Gating a Request
//! ```
//! use std::sync::Arc;
//! use auth::{AccessGate, AuthDecision, RouteTable, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(b"secret_key_at_least_32_bytes_long!", chrono::Duration::hours(24)).unwrap());
//! let gate = AccessGate::new(tokens, RouteTable::default());
//! assert_eq!(gate.decide("/api/protected", None), AuthDecision::Deny);
//! ```

pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use gate::AccessGate;
pub use gate::AuthDecision;
pub use gate::RouteClass;
pub use gate::RouteTable;
pub use jwt::extract_bearer_token;
pub use jwt::JwtError;
pub use jwt::TokenClaims;
pub use jwt::TokenService;
pub use jwt::TokenSubject;
pub use password::HashedPassword;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordRule;
pub use password::PolicyViolation;
