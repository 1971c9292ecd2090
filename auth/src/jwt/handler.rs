use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenSubject;
use super::errors::JwtError;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Stateless access token issuance and verification.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide secret fixed at
/// construction. Verification is a pure function of the token, the secret
/// and the current time.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `MissingSigningKey` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Changing the secret invalidates every token issued before
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a subject, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix timestamp).
    pub fn issue_at(&self, subject: &TokenSubject, now: i64) -> Result<String, JwtError> {
        self.sign(&TokenClaims::for_subject(subject, now, self.ttl))
    }

    /// Sign an explicit set of claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, wrongly signed, incomplete or expired
    pub fn verify(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (Unix timestamp).
    ///
    /// The signature is always checked before the expiry, and every failure
    /// maps to the same `InvalidToken` value.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "token rejected");
                JwtError::InvalidToken
            })?;

        if claims.is_expired(now) {
            tracing::debug!(reason = "expired", "token rejected");
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
            .expect("Failed to create token service")
    }

    fn alice() -> TokenSubject {
        TokenSubject {
            id: "3f8e2a34-6f0f-4c63-9f34-1a2b3c4d5e6f".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_new_rejects_empty_secret() {
        let result = TokenService::new(b"", Duration::hours(24));
        assert!(matches!(result, Err(JwtError::MissingSigningKey)));
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();

        let token = service.issue(&alice()).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = service.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.subject(), alice());
        assert!(claims.exp > Utc::now().timestamp());
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_verify_invalid_token() {
        let result = service().verify("invalid.token.here");
        assert_eq!(result, Err(JwtError::InvalidToken));

        let result = service().verify("");
        assert_eq!(result, Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let other = TokenService::new(b"secret2_at_least_32_bytes_long_key!", Duration::hours(1))
            .unwrap();

        let token = other.issue(&alice()).expect("Failed to issue token");

        assert_eq!(service().verify(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let service = service();
        let token = service.issue(&alice()).unwrap();
        let forged = service
            .issue(&TokenSubject {
                name: "Mallory".to_string(),
                ..alice()
            })
            .unwrap();

        // Splice the forged payload onto the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(service.verify(&spliced), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let service = service();
        let issued_at = 1_000_000;
        let token = service.issue_at(&alice(), issued_at).unwrap();
        let exp = issued_at + DEFAULT_TOKEN_TTL_HOURS * 3600;

        assert!(service.verify_at(&token, exp - 1).is_ok());
        assert_eq!(service.verify_at(&token, exp), Err(JwtError::InvalidToken));
        assert_eq!(service.verify_at(&token, exp + 1), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_expired_and_bad_signature_are_indistinguishable() {
        let service = service();
        let expired = service
            .sign(&TokenClaims::for_subject(&alice(), 0, Duration::seconds(10)))
            .unwrap();
        let other = TokenService::new(b"another_secret_at_least_32_bytes!!", Duration::hours(1))
            .unwrap();
        let badly_signed = other.issue(&alice()).unwrap();

        assert_eq!(service.verify(&expired), service.verify(&badly_signed));
    }

    #[test]
    fn test_missing_claim_is_invalid() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "user123".to_string(),
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_other_algorithm_is_invalid() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &TokenClaims::for_subject(&alice(), Utc::now().timestamp(), Duration::hours(1)),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(JwtError::InvalidToken));
    }
}
