use std::sync::Arc;

use chrono::Utc;

use super::routes::RouteClass;
use super::routes::RouteTable;
use crate::jwt::extract_bearer_token;
use crate::jwt::TokenService;
use crate::jwt::TokenSubject;

/// Outcome of gating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Let the request through, attaching the verified identity if any.
    Allow { identity: Option<TokenSubject> },
    /// Unauthenticated access to a protected API path.
    Deny,
    /// Unauthenticated access to a protected page.
    RedirectToLogin { location: String },
    /// Authenticated access to a login/registration page.
    RedirectHome { location: String },
}

/// Per-request access decision.
///
/// Holds no mutable state: the decision depends only on the path, the
/// authorization header, the signing key and the clock.
pub struct AccessGate {
    tokens: Arc<TokenService>,
    routes: RouteTable,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>, routes: RouteTable) -> Self {
        Self { tokens, routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide what happens to a request for `path`.
    ///
    /// # Arguments
    /// * `path` - Request path, without query string
    /// * `authorization` - Raw `Authorization` header value, if present
    pub fn decide(&self, path: &str, authorization: Option<&str>) -> AuthDecision {
        self.decide_at(path, authorization, Utc::now().timestamp())
    }

    /// Same as [`decide`](Self::decide) with an explicit clock (Unix timestamp).
    pub fn decide_at(&self, path: &str, authorization: Option<&str>, now: i64) -> AuthDecision {
        let class = self.routes.classify(path);
        if class == RouteClass::Other {
            return AuthDecision::Allow { identity: None };
        }

        let identity = extract_bearer_token(authorization)
            .and_then(|token| self.tokens.verify_at(token, now).ok())
            .map(|claims| claims.subject());

        match (class, identity) {
            (RouteClass::Protected { .. }, Some(identity)) => AuthDecision::Allow {
                identity: Some(identity),
            },
            (RouteClass::Protected { api: true }, None) => AuthDecision::Deny,
            (RouteClass::Protected { api: false }, None) => AuthDecision::RedirectToLogin {
                location: self.routes.login_redirect(path),
            },
            (RouteClass::AuthPage, Some(_)) => AuthDecision::RedirectHome {
                location: self.routes.home_path.clone(),
            },
            (RouteClass::AuthPage, None) | (RouteClass::Other, _) => {
                AuthDecision::Allow { identity: None }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::TokenClaims;

    const SECRET: &[u8] = b"gate_test_secret_at_least_32_bytes!";

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, Duration::hours(24)).unwrap())
    }

    fn gate() -> AccessGate {
        let routes = RouteTable {
            protected_prefixes: vec![
                "/api/protected".to_string(),
                "/api/user".to_string(),
                "/dashboard".to_string(),
            ],
            ..RouteTable::default()
        };
        AccessGate::new(tokens(), routes)
    }

    fn alice() -> TokenSubject {
        TokenSubject {
            id: "user-1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[test]
    fn test_protected_api_without_token_is_denied() {
        assert_eq!(gate().decide("/api/protected", None), AuthDecision::Deny);
    }

    #[test]
    fn test_protected_api_with_invalid_token_is_denied() {
        let header = bearer("not.a.token");
        assert_eq!(
            gate().decide("/api/protected", Some(&header)),
            AuthDecision::Deny
        );
    }

    #[test]
    fn test_protected_api_with_expired_token_is_denied() {
        let token = tokens()
            .sign(&TokenClaims::for_subject(&alice(), 0, Duration::seconds(60)))
            .unwrap();
        let header = bearer(&token);

        assert_eq!(
            gate().decide("/api/protected", Some(&header)),
            AuthDecision::Deny
        );
    }

    #[test]
    fn test_protected_api_with_wrong_scheme_is_denied() {
        let token = tokens().issue(&alice()).unwrap();
        let header = format!("bearer {}", token);

        assert_eq!(
            gate().decide("/api/protected", Some(&header)),
            AuthDecision::Deny
        );
    }

    #[test]
    fn test_protected_with_valid_token_attaches_identity() {
        let gate = gate();
        let token = tokens().issue(&alice()).unwrap();
        let header = bearer(&token);

        assert_eq!(
            gate.decide("/api/users", Some(&header)),
            AuthDecision::Allow {
                identity: Some(alice())
            }
        );
        assert_eq!(
            gate.decide("/dashboard", Some(&header)),
            AuthDecision::Allow {
                identity: Some(alice())
            }
        );
    }

    #[test]
    fn test_protected_page_redirects_to_login() {
        assert_eq!(
            gate().decide("/dashboard/settings", None),
            AuthDecision::RedirectToLogin {
                location: "/login?redirect=%2Fdashboard%2Fsettings".to_string()
            }
        );
    }

    #[test]
    fn test_auth_page_when_authenticated_redirects_home() {
        let token = tokens().issue(&alice()).unwrap();
        let header = bearer(&token);

        assert_eq!(
            gate().decide("/login", Some(&header)),
            AuthDecision::RedirectHome {
                location: "/".to_string()
            }
        );
        assert_eq!(
            gate().decide("/register", Some(&header)),
            AuthDecision::RedirectHome {
                location: "/".to_string()
            }
        );
    }

    #[test]
    fn test_auth_page_when_anonymous_is_allowed() {
        assert_eq!(
            gate().decide("/login", None),
            AuthDecision::Allow { identity: None }
        );
    }

    #[test]
    fn test_other_paths_never_attach_identity() {
        let token = tokens().issue(&alice()).unwrap();
        let header = bearer(&token);

        assert_eq!(
            gate().decide("/api/auth/login", Some(&header)),
            AuthDecision::Allow { identity: None }
        );
        assert_eq!(
            gate().decide("/", None),
            AuthDecision::Allow { identity: None }
        );
    }

    #[test]
    fn test_decision_respects_clock() {
        let gate = gate();
        let token = tokens().issue_at(&alice(), 1_000).unwrap();
        let header = bearer(&token);
        let exp = 1_000 + 24 * 3600;

        assert_eq!(
            gate.decide_at("/api/protected", Some(&header), exp - 1),
            AuthDecision::Allow {
                identity: Some(alice())
            }
        );
        assert_eq!(
            gate.decide_at("/api/protected", Some(&header), exp),
            AuthDecision::Deny
        );
    }
}
