use jitaccess_domain::UserId;
use serde::Deserialize;
use serde_json::Value;
use ts_rs::TS;

/// Role create and update payload.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-definition-request.ts"
)]
pub struct RoleDefinitionRequest {
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sensitivity_level: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub icon_color: Option<String>,
}

/// Role enable toggle payload.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/toggle-role-request.ts"
)]
pub struct ToggleRoleRequest {
    #[serde(default)]
    pub is_enabled: Option<bool>,
}

/// Full replacement of a role's database role mappings.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/db-role-mapping-request.ts"
)]
pub struct DbRoleMappingRequest {
    #[serde(default)]
    pub db_role_ids: Vec<i64>,
}

/// Full replacement of a role's eligibility rules.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/eligibility-rules-request.ts"
)]
pub struct EligibilityRulesRequest {
    #[serde(default)]
    #[ts(type = "Array<Record<string, unknown>>")]
    pub rules: Vec<Value>,
}

/// Team create and update payload.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/team-definition-request.ts"
)]
pub struct TeamDefinitionRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Full replacement of a team's members.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/team-members-request.ts"
)]
pub struct TeamMembersRequest {
    #[serde(default)]
    #[ts(type = "Array<string | number>")]
    pub user_ids: Vec<UserId>,
}

/// System role flags payload. Missing flags are cleared.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/system-roles-request.ts"
)]
pub struct SystemRolesRequest {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_approver: bool,
    #[serde(default)]
    pub is_data_steward: bool,
}

/// Query string of the paginated user listing.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-list-query.ts"
)]
pub struct UserListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Query string of the paginated audit log listing.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-query.ts"
)]
pub struct AuditLogQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}
