use jitaccess_core::{AppError, AppResult};

/// Ordered, de-duplicated set of positive role identifiers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleIdSet(Vec<i64>);

impl RoleIdSet {
    /// Validates the set and removes duplicates, keeping first occurrences.
    pub fn new(role_ids: impl IntoIterator<Item = i64>) -> AppResult<Self> {
        let mut unique = Vec::new();
        for role_id in role_ids {
            if role_id <= 0 {
                return Err(AppError::Validation(format!(
                    "role id '{role_id}' must be a positive integer"
                )));
            }

            if !unique.contains(&role_id) {
                unique.push(role_id);
            }
        }

        if unique.is_empty() {
            return Err(AppError::Validation(
                "at least one role must be requested".to_owned(),
            ));
        }

        Ok(Self(unique))
    }

    /// Returns the role identifiers in request order.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        self.0.as_slice()
    }

    /// Returns the comma separated form expected by `jit.sp_Request_Create`.
    #[must_use]
    pub fn to_csv(&self) -> String {
        self.0
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Validated access request submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequestInput {
    role_ids: RoleIdSet,
    duration_minutes: i64,
    justification: String,
    ticket_ref: Option<String>,
}

impl AccessRequestInput {
    /// Validates a submission before it reaches the database.
    pub fn new(
        role_ids: Vec<i64>,
        duration_minutes: i64,
        justification: String,
        ticket_ref: Option<String>,
    ) -> AppResult<Self> {
        let role_ids = RoleIdSet::new(role_ids)?;
        if duration_minutes <= 0 {
            return Err(AppError::Validation(
                "durationMinutes must be greater than zero".to_owned(),
            ));
        }

        let ticket_ref = ticket_ref
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            role_ids,
            duration_minutes,
            justification,
            ticket_ref,
        })
    }

    /// Returns the requested roles.
    #[must_use]
    pub fn role_ids(&self) -> &RoleIdSet {
        &self.role_ids
    }

    /// Returns the requested grant duration in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Returns the free-text justification.
    #[must_use]
    pub fn justification(&self) -> &str {
        self.justification.as_str()
    }

    /// Returns the change ticket reference, if any.
    #[must_use]
    pub fn ticket_ref(&self) -> Option<&str> {
        self.ticket_ref.as_deref()
    }
}

/// Mandatory reason recorded when a request is denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialReason(String);

impl DenialReason {
    /// Trims the comment and rejects blank or missing reasons.
    pub fn new(comment: Option<&str>) -> AppResult<Self> {
        let trimmed = comment.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "A reason is required when denying a request.".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the trimmed reason.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use jitaccess_core::AppError;

    use super::{AccessRequestInput, DenialReason, RoleIdSet};

    #[test]
    fn role_ids_are_deduplicated_in_order() {
        let role_ids = RoleIdSet::new([7, 3, 7, 9, 3]);
        assert_eq!(role_ids.map(|ids| ids.to_csv()).ok().as_deref(), Some("7,3,9"));
    }

    #[test]
    fn empty_role_set_is_rejected() {
        let result = RoleIdSet::new(Vec::new());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn non_positive_role_id_is_rejected() {
        let result = RoleIdSet::new([3, 0]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let result = AccessRequestInput::new(vec![3], 0, "audit".to_owned(), None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn blank_ticket_ref_becomes_none() {
        let input = AccessRequestInput::new(vec![3], 60, String::new(), Some("   ".to_owned()));
        let Ok(input) = input else {
            panic!("input should validate");
        };
        assert_eq!(input.ticket_ref(), None);
    }

    #[test]
    fn denial_reason_is_trimmed_and_required() {
        assert!(matches!(
            DenialReason::new(Some("  ")),
            Err(AppError::Validation(message)) if message == "A reason is required when denying a request."
        ));
        assert!(DenialReason::new(None).is_err());
        assert_eq!(
            DenialReason::new(Some(" out of scope ")).ok().as_ref().map(DenialReason::as_str),
            Some("out of scope")
        );
    }
}
