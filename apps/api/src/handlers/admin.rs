mod audit;
mod roles;
mod teams;
mod users;

use axum::Json;
use axum::extract::Extension;
use jitaccess_domain::UserProfile;

use crate::dto::ApiResponse;
use crate::error::ApiResult;
use crate::state::RequestSession;

pub use audit::list_audit_log_handler;
pub use roles::{
    create_role_handler, delete_role_handler, list_available_db_roles_handler,
    list_role_db_roles_handler, list_role_eligibility_rules_handler, list_role_users_handler,
    list_roles_handler, replace_role_db_roles_handler, replace_role_eligibility_rules_handler,
    toggle_role_handler, update_role_handler,
};
pub use teams::{
    create_team_handler, delete_team_handler, list_team_members_handler, list_teams_handler,
    replace_team_members_handler, update_team_handler,
};
pub use users::{list_users_handler, update_system_roles_handler};

pub async fn dashboard_stats_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let stats = session.catalog().dashboard_stats(&user).await?;
    Ok(Json(ApiResponse::row(stats)))
}

pub async fn lookup_values_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let lookups = session.catalog().lookup_values(&user).await?;
    Ok(Json(ApiResponse::rows(lookups)))
}
