use super::errors::PolicyViolation;

/// A single password strength requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// At least this many characters.
    MinLength(usize),
    /// At least one alphabetic character.
    RequireLetter,
    /// At least one numeric character.
    RequireDigit,
}

impl PasswordRule {
    fn check(&self, password: &str) -> Result<(), PolicyViolation> {
        let satisfied = match self {
            PasswordRule::MinLength(min) => password.chars().count() >= *min,
            PasswordRule::RequireLetter => password.chars().any(char::is_alphabetic),
            PasswordRule::RequireDigit => password.chars().any(char::is_numeric),
        };

        if satisfied {
            Ok(())
        } else {
            Err(PolicyViolation {
                message: self.message(),
            })
        }
    }

    fn message(&self) -> String {
        match self {
            PasswordRule::MinLength(min) => {
                format!("Password must be at least {} characters long", min)
            }
            PasswordRule::RequireLetter => "Password must contain at least one letter".to_string(),
            PasswordRule::RequireDigit => "Password must contain at least one number".to_string(),
        }
    }
}

/// Ordered set of password rules.
///
/// The default is the legacy policy: eight characters, one letter, one digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 8;

    pub fn new(rules: Vec<PasswordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PasswordRule] {
        &self.rules
    }

    /// Check a password against every rule in order.
    ///
    /// # Errors
    /// The violation of the first rule that fails
    pub fn validate(&self, password: &str) -> Result<(), PolicyViolation> {
        self.rules.iter().try_for_each(|rule| rule.check(password))
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(vec![
            PasswordRule::MinLength(Self::DEFAULT_MIN_LENGTH),
            PasswordRule::RequireLetter,
            PasswordRule::RequireDigit,
        ])
    }
}
