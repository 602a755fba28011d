use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use jitaccess_domain::{
    DEFAULT_USER_PAGE_SIZE, PageRequest, SystemRoleFlags, UserId, UserListFilter, UserProfile,
};

use crate::dto::{ApiResponse, SystemRolesRequest, UserListQuery};
use crate::error::ApiResult;
use crate::extract::{json_body, path_param, query_params};
use crate::state::RequestSession;

pub async fn list_users_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let query = query_params(query)?;
    let page = PageRequest::new(query.page, query.page_size, DEFAULT_USER_PAGE_SIZE)?;
    let filter = UserListFilter {
        search: query.search,
        department: query.department,
        role: query.role,
        status: query.status,
    };

    let users = session.catalog().list_users(&user, filter, page).await?;
    Ok(Json(ApiResponse::rows(users)))
}

pub async fn update_system_roles_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    user_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<SystemRolesRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let user_id = UserId::new(path_param(user_id)?)?;
    let payload = json_body(payload)?;
    let flags = SystemRoleFlags {
        is_admin: payload.is_admin,
        is_approver: payload.is_approver,
        is_data_steward: payload.is_data_steward,
    };

    session
        .catalog()
        .update_system_roles(&user, &user_id, flags)
        .await?;
    Ok(Json(ApiResponse::message("User roles updated.")))
}
