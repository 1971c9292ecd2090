use serde::Deserialize;

/// Classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a valid token. `api` selects 401 over a login redirect.
    Protected { api: bool },
    /// Login/registration pages, pointless once authenticated.
    AuthPage,
    Other,
}

/// Static route sets the gate classifies paths against.
///
/// Matching is by prefix. The protected set is consulted first, so a path
/// matching both sets is protected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub protected_prefixes: Vec<String>,
    pub auth_page_prefixes: Vec<String>,
    pub api_prefix: String,
    pub login_path: String,
    pub home_path: String,
}

impl RouteTable {
    pub fn classify(&self, path: &str) -> RouteClass {
        if Self::matches_any(&self.protected_prefixes, path) {
            RouteClass::Protected {
                api: path.starts_with(&self.api_prefix),
            }
        } else if Self::matches_any(&self.auth_page_prefixes, path) {
            RouteClass::AuthPage
        } else {
            RouteClass::Other
        }
    }

    /// Login location carrying `path` as the `redirect` query parameter.
    pub fn login_redirect(&self, path: &str) -> String {
        format!("{}?redirect={}", self.login_path, urlencoding::encode(path))
    }

    fn matches_any(prefixes: &[String], path: &str) -> bool {
        prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/api/protected".to_string(), "/api/user".to_string()],
            auth_page_prefixes: vec!["/login".to_string(), "/register".to_string()],
            api_prefix: "/api/".to_string(),
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_table() {
        let routes = RouteTable::default();

        assert_eq!(
            routes.classify("/api/protected"),
            RouteClass::Protected { api: true }
        );
        assert_eq!(
            routes.classify("/api/users/me"),
            RouteClass::Protected { api: true }
        );
        assert_eq!(routes.classify("/login"), RouteClass::AuthPage);
        assert_eq!(routes.classify("/register"), RouteClass::AuthPage);
        assert_eq!(routes.classify("/api/auth/login"), RouteClass::Other);
        assert_eq!(routes.classify("/"), RouteClass::Other);
    }

    #[test]
    fn test_page_style_protected_route() {
        let routes = RouteTable {
            protected_prefixes: vec!["/dashboard".to_string()],
            ..RouteTable::default()
        };

        assert_eq!(
            routes.classify("/dashboard/settings"),
            RouteClass::Protected { api: false }
        );
    }

    #[test]
    fn test_protected_wins_overlap() {
        let routes = RouteTable {
            protected_prefixes: vec!["/login/admin".to_string()],
            ..RouteTable::default()
        };

        assert_eq!(
            routes.classify("/login/admin"),
            RouteClass::Protected { api: false }
        );
        assert_eq!(routes.classify("/login"), RouteClass::AuthPage);
    }

    #[test]
    fn test_login_redirect_encodes_path() {
        let routes = RouteTable::default();

        assert_eq!(
            routes.login_redirect("/dashboard/a b"),
            "/login?redirect=%2Fdashboard%2Fa%20b"
        );
    }
}
