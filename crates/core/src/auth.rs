use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Login presented by the caller, either bare (`alice`) or domain-qualified
/// (`CORP\alice`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginName(String);

impl LoginName {
    /// Creates a login from a raw transport value.
    pub fn new(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Unauthenticated(
                "login name must not be empty".to_owned(),
            ));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::Unauthenticated(
                "login name must not contain control characters".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the login exactly as presented.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns a T-SQL `LIKE` pattern matching any domain-qualified login
    /// ending in `\<login>`.
    ///
    /// `%`, `_` and `[` inside the login are bracket-escaped so they only
    /// match themselves.
    #[must_use]
    pub fn domain_qualified_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 4);
        pattern.push_str("%\\");
        for character in self.0.chars() {
            match character {
                '%' => pattern.push_str("[%]"),
                '_' => pattern.push_str("[_]"),
                '[' => pattern.push_str("[[]"),
                other => pattern.push(other),
            }
        }
        pattern
    }
}

impl Display for LoginName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::LoginName;

    #[test]
    fn login_is_trimmed() {
        let login = LoginName::new("  alice \n");
        assert_eq!(login.ok().map(|value| value.to_string()).as_deref(), Some("alice"));
    }

    #[test]
    fn blank_login_is_rejected() {
        assert!(LoginName::new("   ").is_err());
    }

    #[test]
    fn bare_login_matches_domain_qualified_rows() {
        let login = LoginName::new("alice").ok();
        assert_eq!(
            login.map(|value| value.domain_qualified_pattern()).as_deref(),
            Some("%\\alice")
        );
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        let login = LoginName::new("svc_jit%[x").ok();
        assert_eq!(
            login.map(|value| value.domain_qualified_pattern()).as_deref(),
            Some("%\\svc[_]jit[%][[]x")
        );
    }
}
