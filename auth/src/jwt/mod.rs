pub mod bearer;
pub mod claims;
pub mod errors;
pub mod handler;

pub use bearer::extract_bearer_token;
pub use claims::TokenClaims;
pub use claims::TokenSubject;
pub use errors::JwtError;
pub use handler::TokenService;
pub use handler::DEFAULT_TOKEN_TTL_HOURS;
