use serde::{Deserialize, Serialize};

use crate::UserProfile;

/// Coarse capabilities derived from a user's system role flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May review and decide pending requests.
    Approver,
    /// May maintain the role and team catalog and read the audit trail.
    Manager,
}

impl Capability {
    /// Returns a stable name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approver => "approver",
            Self::Manager => "manager",
        }
    }

    /// Returns whether the user's flags grant this capability.
    #[must_use]
    pub fn is_granted_to(&self, user: &UserProfile) -> bool {
        match self {
            Self::Approver => user.is_admin || user.is_approver || user.is_data_steward,
            Self::Manager => user.is_admin || user.is_data_steward,
        }
    }

    /// Returns the message shown to callers lacking this capability.
    #[must_use]
    pub fn denial_message(&self) -> &'static str {
        match self {
            Self::Approver => "Approver access required.",
            Self::Manager => "Manager access required.",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::Capability;
    use crate::UserProfile;

    fn user(flags: Value) -> UserProfile {
        let mut row = Map::new();
        row.insert("UserId".to_owned(), json!("7"));
        row.insert("LoginName".to_owned(), json!("CORP\\carol"));
        if let Value::Object(flags) = flags {
            row.extend(flags);
        }
        match UserProfile::from_row(row) {
            Ok(user) => user,
            Err(error) => panic!("test row should parse: {error}"),
        }
    }

    #[test]
    fn approver_flag_grants_approver_only() {
        let approver = user(json!({ "IsApprover": true }));
        assert!(Capability::Approver.is_granted_to(&approver));
        assert!(!Capability::Manager.is_granted_to(&approver));
    }

    #[test]
    fn data_steward_grants_both_capabilities() {
        let steward = user(json!({ "IsDataSteward": 1 }));
        assert!(Capability::Approver.is_granted_to(&steward));
        assert!(Capability::Manager.is_granted_to(&steward));
    }

    #[test]
    fn plain_user_has_no_capability() {
        let plain = user(json!({}));
        assert!(!Capability::Approver.is_granted_to(&plain));
        assert!(!Capability::Manager.is_granted_to(&plain));
    }
}
