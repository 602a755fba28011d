//! Stored procedure names and the few ad hoc statements the service issues.

/// Active grants for one user.
pub const GRANT_LIST_ACTIVE_FOR_USER: &str = "jit.sp_Grant_ListActiveForUser";
/// Requests submitted by one user.
pub const REQUEST_LIST_FOR_USER: &str = "jit.sp_Request_ListForUser";
/// Roles the user is eligible to request.
pub const ROLE_LIST_REQUESTABLE: &str = "jit.sp_Role_ListRequestable";
/// Submits a request for one or more roles.
pub const REQUEST_CREATE: &str = "jit.sp_Request_Create";
/// Cancels the caller's own pending request.
pub const REQUEST_CANCEL: &str = "jit.sp_Request_Cancel";
/// Pending requests the approver may decide.
pub const REQUEST_LIST_PENDING_FOR_APPROVER: &str = "jit.sp_Request_ListPendingForApprover";
/// Roles attached to one request.
pub const REQUEST_GET_ROLES: &str = "jit.sp_Request_GetRoles";
/// Approves a pending request.
pub const REQUEST_APPROVE: &str = "jit.sp_Request_Approve";
/// Denies a pending request.
pub const REQUEST_DENY: &str = "jit.sp_Request_Deny";

/// Dashboard counters, one row.
pub const STATS_DASHBOARD: &str = "jit.sp_Stats_Dashboard";
/// Lookup values for catalog forms.
pub const LOOKUP_VALUES: &str = "jit.sp_LookupValues";

/// Roles with grant and request counters.
pub const ROLE_LIST_WITH_STATS: &str = "jit.sp_Role_ListWithStats";
/// Creates a role.
pub const ROLE_CREATE: &str = "jit.sp_Role_Create";
/// Updates a role definition.
pub const ROLE_UPDATE: &str = "jit.sp_Role_Update";
/// Deletes a role.
pub const ROLE_DELETE: &str = "jit.sp_Role_Delete";
/// Enables or disables a role.
pub const ROLE_TOGGLE_ENABLED: &str = "jit.sp_Role_ToggleEnabled";
/// Users currently holding a role.
pub const ROLE_LIST_USERS: &str = "jit.sp_Role_ListUsers";
/// Database roles mapped to a role.
pub const ROLE_GET_DB_ROLES: &str = "jit.sp_Role_GetDbRoles";
/// Replaces the database roles mapped to a role.
pub const ROLE_SET_DB_ROLES: &str = "jit.sp_Role_SetDbRoles";
/// Eligibility rules attached to a role.
pub const ROLE_GET_ELIGIBILITY_RULES: &str = "jit.sp_Role_GetEligibilityRules";
/// Replaces the eligibility rules attached to a role.
pub const ROLE_SET_ELIGIBILITY_RULES: &str = "jit.sp_Role_SetEligibilityRules";
/// Database roles available for mapping.
pub const DB_ROLE_LIST_AVAILABLE: &str = "jit.sp_DbRole_ListAvailable";

/// Teams with member counters.
pub const TEAM_LIST_WITH_STATS: &str = "jit.sp_Team_ListWithStats";
/// Creates a team.
pub const TEAM_CREATE: &str = "jit.sp_Team_Create";
/// Updates a team.
pub const TEAM_UPDATE: &str = "jit.sp_Team_Update";
/// Deletes a team.
pub const TEAM_DELETE: &str = "jit.sp_Team_Delete";
/// Members of a team.
pub const TEAM_GET_MEMBERS: &str = "jit.sp_Team_GetMembers";
/// Replaces the members of a team.
pub const TEAM_SET_MEMBERS: &str = "jit.sp_Team_SetMembers";

/// Filtered, paginated user listing.
pub const USER_LIST_PAGINATED: &str = "jit.sp_User_ListPaginated";
/// Replaces the system role flags of a user.
pub const USER_UPDATE_SYSTEM_ROLES: &str = "jit.sp_User_UpdateSystemRoles";
/// Filtered, paginated audit log listing.
pub const AUDIT_LOG_LIST_PAGINATED: &str = "jit.sp_AuditLog_ListPaginated";

/// Active user lookup. `@P1` is the presented login, `@P2` the
/// domain-qualified `LIKE` pattern. Exact matches win over suffix matches.
pub const FIND_ACTIVE_USER_BY_LOGIN: &str = "\
SELECT TOP (1)
    UserId, LoginName, GivenName, Surname, DisplayName,
    Email, Division, Department, JobTitle, SeniorityLevel,
    IsAdmin, IsApprover, IsDataSteward, IsActive
FROM jit.Users
WHERE (LoginName = @P1 OR LoginName LIKE @P2)
  AND IsActive = 1
ORDER BY CASE WHEN LoginName = @P1 THEN 0 ELSE 1 END";

/// Request header joined with requester attributes. `@P1` is the request id.
pub const REQUEST_DETAIL: &str = "\
SELECT
    r.RequestId, r.UserId, r.RequestedDurationMinutes, r.Justification, r.TicketRef,
    r.Status, r.UserDeptSnapshot, r.UserTitleSnapshot, r.CreatedUtc, r.UpdatedUtc,
    u.DisplayName AS RequesterName, u.LoginName AS RequesterLoginName,
    u.Email AS RequesterEmail, u.Department AS RequesterDepartment,
    u.Division AS RequesterDivision, u.SeniorityLevel AS RequesterSeniority
FROM jit.Requests r
INNER JOIN jit.Users u ON u.UserId = r.UserId
WHERE r.RequestId = @P1";

/// Readiness probe.
pub const PING: &str = "SELECT 1 AS Ok";
