pub mod argon2;
pub mod errors;
pub mod policy;

pub use argon2::HashedPassword;
pub use argon2::PasswordHasher;
pub use argon2::MAX_PASSWORD_BYTES;
pub use errors::PasswordError;
pub use errors::PolicyViolation;
pub use policy::PasswordPolicy;
pub use policy::PasswordRule;
