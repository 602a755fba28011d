//! User domain types.
//!
//! User rows are owned by the `jit.Users` table. Column names are PascalCase
//! and are kept that way on the wire so clients see the database shape.

use std::fmt::{Display, Formatter};

use jitaccess_core::{AppError, AppResult};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a user row.
///
/// Deployments use either `uniqueidentifier` or integer keys, so the value is
/// carried as text and bound as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier from its textual form.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the textual identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UserIdVisitor;

        impl Visitor<'_> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a string or integer user id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                UserId::new(value).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(UserId(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(UserId(value.to_string()))
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}

/// Active user projection resolved for the caller of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    /// Stable user identifier.
    pub user_id: UserId,
    /// Login as stored, usually `DOMAIN\user`.
    pub login_name: String,
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Surname.
    #[serde(default)]
    pub surname: Option<String>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Division.
    #[serde(default)]
    pub division: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Numeric or textual depending on the HR feed.
    #[serde(default)]
    pub seniority_level: Option<Value>,
    /// Administrator flag.
    #[serde(default, deserialize_with = "flag")]
    pub is_admin: bool,
    /// Approver flag.
    #[serde(default, deserialize_with = "flag")]
    pub is_approver: bool,
    /// Data steward flag.
    #[serde(default, deserialize_with = "flag")]
    pub is_data_steward: bool,
    /// Account activity flag.
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub is_active: bool,
}

impl UserProfile {
    /// Builds a profile from a `jit.Users` row mapping.
    pub fn from_row(row: Map<String, Value>) -> AppResult<Self> {
        serde_json::from_value(Value::Object(row))
            .map_err(|error| AppError::Internal(format!("malformed user row: {error}")))
    }
}

fn default_active() -> bool {
    true
}

/// Accepts SQL `bit` values surfaced either as booleans or as 0/1 integers.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(value)) => Ok(value),
        Some(Value::Number(number)) => Ok(number.as_i64().is_some_and(|value| value != 0)),
        Some(other) => Err(de::Error::custom(format!(
            "expected a bit flag, got {other}"
        ))),
    }
}

/// Replacement set of system role flags for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemRoleFlags {
    /// Administrator flag.
    pub is_admin: bool,
    /// Approver flag.
    pub is_approver: bool,
    /// Data steward flag.
    pub is_data_steward: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::{UserId, UserProfile};

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn profile_reads_bit_columns() {
        let profile = UserProfile::from_row(row(json!({
            "UserId": "6F9619FF-8B86-D011-B42D-00C04FC964FF",
            "LoginName": "CORP\\alice",
            "DisplayName": "Alice Doe",
            "IsAdmin": false,
            "IsApprover": true,
            "IsDataSteward": null,
            "IsActive": true
        })));

        let Ok(profile) = profile else {
            panic!("profile should parse");
        };
        assert!(profile.is_approver);
        assert!(!profile.is_data_steward);
        assert_eq!(profile.login_name, "CORP\\alice");
    }

    #[test]
    fn profile_accepts_integer_ids_and_flags() {
        let profile = UserProfile::from_row(row(json!({
            "UserId": 42,
            "LoginName": "bob",
            "IsAdmin": 1
        })));

        let Ok(profile) = profile else {
            panic!("profile should parse");
        };
        assert_eq!(profile.user_id.as_str(), "42");
        assert!(profile.is_admin);
        assert!(profile.is_active);
    }

    #[test]
    fn profile_without_user_id_is_rejected() {
        let profile = UserProfile::from_row(row(json!({ "LoginName": "bob" })));
        assert!(profile.is_err());
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert!(UserId::new("  ").is_err());
    }
}
