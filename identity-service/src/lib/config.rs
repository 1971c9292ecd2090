use std::env;

use auth::PasswordPolicy;
use auth::PasswordRule;
use auth::RouteTable;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub routes: RouteTable,
    #[serde(default)]
    pub password_policy: PasswordPolicyConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 3000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Upper bound on token lifetime: one year.
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

fn default_expiration_hours() -> i64 {
    auth::jwt::DEFAULT_TOKEN_TTL_HOURS
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordPolicyConfig {
    pub min_length: usize,
    pub require_letter: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: PasswordPolicy::DEFAULT_MIN_LENGTH,
            require_letter: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicyConfig {
    pub fn to_policy(&self) -> PasswordPolicy {
        let mut rules = vec![PasswordRule::MinLength(self.min_length)];
        if self.require_letter {
            rules.push(PasswordRule::RequireLetter);
        }
        if self.require_digit {
            rules.push(PasswordRule::RequireDigit);
        }
        PasswordPolicy::new(rules)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Fails when no signing secret is configured or the token lifetime is
    /// outside `1..=MAX_EXPIRATION_HOURS`.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }

        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.jwt.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.jwt.expiration_hours
            )));
        }

        Ok(self)
    }
}
