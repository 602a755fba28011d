//! Catalog value types for roles, teams, user listings and the audit trail.

use jitaccess_core::{AppError, AppResult, NonEmptyString};

/// Default sensitivity level applied to new or updated roles.
pub const DEFAULT_SENSITIVITY_LEVEL: &str = "Standard";
/// Default icon name applied to new or updated roles.
pub const DEFAULT_ICON_NAME: &str = "Database";
/// Default icon color applied to new or updated roles.
pub const DEFAULT_ICON_COLOR: &str = "bg-blue-500";

/// Default page size for user listings.
pub const DEFAULT_USER_PAGE_SIZE: i64 = 25;
/// Default page size for audit log listings.
pub const DEFAULT_AUDIT_PAGE_SIZE: i64 = 50;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Role definition fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinitionInput {
    /// Display name of the role.
    pub role_name: NonEmptyString,
    /// Optional description.
    pub description: Option<String>,
    /// Sensitivity label.
    pub sensitivity_level: String,
    /// Icon identifier used by the client.
    pub icon_name: String,
    /// Icon background class used by the client.
    pub icon_color: String,
}

impl RoleDefinitionInput {
    /// Validates the name and fills presentation defaults.
    pub fn new(
        role_name: &str,
        description: Option<String>,
        sensitivity_level: Option<String>,
        icon_name: Option<String>,
        icon_color: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            role_name: NonEmptyString::trimmed(role_name, "roleName")?,
            description,
            sensitivity_level: or_default(sensitivity_level, DEFAULT_SENSITIVITY_LEVEL),
            icon_name: or_default(icon_name, DEFAULT_ICON_NAME),
            icon_color: or_default(icon_color, DEFAULT_ICON_COLOR),
        })
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Team definition fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDefinitionInput {
    /// Display name of the team.
    pub team_name: NonEmptyString,
    /// Optional description.
    pub description: Option<String>,
    /// Optional owning department.
    pub department: Option<String>,
}

impl TeamDefinitionInput {
    /// Validates the team name.
    pub fn new(
        team_name: &str,
        description: Option<String>,
        department: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            team_name: NonEmptyString::trimmed(team_name, "teamName")?,
            description,
            department,
        })
    }
}

/// Comma separated identifier list used for full-replace procedures.
///
/// An empty list is valid and clears the target collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdCsv(String);

impl IdCsv {
    /// Joins integer identifiers.
    #[must_use]
    pub fn from_integers(ids: &[i64]) -> Self {
        Self(
            ids.iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Joins textual identifiers, rejecting blanks and embedded commas.
    pub fn from_texts(ids: &[String], field_name: &str) -> AppResult<Self> {
        let mut parts = Vec::with_capacity(ids.len());
        for id in ids {
            let trimmed = id.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation(format!(
                    "{field_name} must not contain blank ids"
                )));
            }
            if trimmed.contains(',') {
                return Err(AppError::Validation(format!(
                    "{field_name} entry '{trimmed}' must not contain commas"
                )));
            }
            parts.push(trimmed);
        }

        Ok(Self(parts.join(",")))
    }

    /// Returns the joined list.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Validates the window, falling back to page 1 and `default_size`.
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_size: i64) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(default_size);
        if page < 1 {
            return Err(AppError::Validation(
                "page must be greater than or equal to 1".to_owned(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::Validation(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(Self { page, page_size })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }
}

/// Filters for the paginated user listing. Empty strings mean "any".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserListFilter {
    /// Free-text search.
    pub search: String,
    /// Department filter.
    pub department: String,
    /// System role filter.
    pub role: String,
    /// Activity status filter.
    pub status: String,
}

/// Filters for the paginated audit log listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditLogFilter {
    /// Free-text search.
    pub search: String,
    /// Event type filter.
    pub event_type: String,
    /// Inclusive lower bound, `None` when unbounded.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `None` when unbounded.
    pub end_date: Option<String>,
}

impl AuditLogFilter {
    /// Builds a filter, turning blank date bounds into `None`.
    #[must_use]
    pub fn new(
        search: String,
        event_type: String,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Self {
        Self {
            search,
            event_type,
            start_date: non_blank(start_date),
            end_date: non_blank(end_date),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
