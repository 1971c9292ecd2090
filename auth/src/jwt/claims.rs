use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// JWT claims carried by every access token.
///
/// All fields are required; a token missing any of them does not verify.
/// Claims are never modified after signing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Normalized email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a subject issued at `now` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token speaks for
    /// * `now` - Issue time (Unix timestamp)
    /// * `ttl` - Lifetime of the token
    pub fn for_subject(subject: &TokenSubject, now: i64, ttl: Duration) -> Self {
        Self {
            sub: subject.id.clone(),
            email: subject.email.clone(),
            name: subject.name.clone(),
            iat: now,
            exp: now + ttl.num_seconds(),
        }
    }

    /// A token is live strictly before its expiration instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> TokenSubject {
        TokenSubject {
            id: "user123".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_for_subject() {
        let claims = TokenClaims::for_subject(&alice(), 1_000, Duration::hours(24));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.subject(), alice());
    }

    #[test]
    fn test_is_expired() {
        let claims = TokenClaims::for_subject(&alice(), 0, Duration::seconds(1000));

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_missing_claim_fails_to_deserialize() {
        let json = serde_json::json!({
            "sub": "user123",
            "email": "alice@example.com",
            "iat": 1,
            "exp": 2
        });

        assert!(serde_json::from_value::<TokenClaims>(json).is_err());
    }
}
