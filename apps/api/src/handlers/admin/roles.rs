use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path};
use jitaccess_core::AppResult;
use jitaccess_domain::{RoleDefinitionInput, UserProfile};

use crate::dto::{
    ApiResponse, DbRoleMappingRequest, EligibilityRulesRequest, RoleDefinitionRequest,
    ToggleRoleRequest,
};
use crate::error::ApiResult;
use crate::extract::{json_body, optional_json_body, path_param};
use crate::state::RequestSession;

pub async fn list_roles_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let roles = session.catalog().list_roles(&user).await?;
    Ok(Json(ApiResponse::rows(roles)))
}

pub async fn create_role_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    payload: Result<Json<RoleDefinitionRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let input = role_definition(json_body(payload)?)?;

    session.catalog().create_role(&user, input).await?;
    Ok(Json(ApiResponse::message("Role created.")))
}

pub async fn update_role_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RoleDefinitionRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let input = role_definition(json_body(payload)?)?;

    session.catalog().update_role(&user, role_id, input).await?;
    Ok(Json(ApiResponse::message("Role updated.")))
}

pub async fn delete_role_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;

    session.catalog().delete_role(&user, role_id).await?;
    Ok(Json(ApiResponse::message("Role deleted.")))
}

pub async fn toggle_role_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let payload = optional_json_body::<ToggleRoleRequest>(&body)?;

    session
        .catalog()
        .set_role_enabled(&user, role_id, payload.is_enabled.unwrap_or(true))
        .await?;
    Ok(Json(ApiResponse::message("Role updated.")))
}

pub async fn list_role_users_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let users = session.catalog().list_role_users(&user, role_id).await?;
    Ok(Json(ApiResponse::rows(users)))
}

pub async fn list_role_db_roles_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let db_roles = session.catalog().list_role_db_roles(&user, role_id).await?;
    Ok(Json(ApiResponse::rows(db_roles)))
}

pub async fn replace_role_db_roles_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DbRoleMappingRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let payload = json_body(payload)?;

    session
        .catalog()
        .replace_role_db_roles(&user, role_id, &payload.db_role_ids)
        .await?;
    Ok(Json(ApiResponse::message("DB role mappings updated.")))
}

pub async fn list_role_eligibility_rules_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let rules = session
        .catalog()
        .list_role_eligibility_rules(&user, role_id)
        .await?;
    Ok(Json(ApiResponse::rows(rules)))
}

pub async fn replace_role_eligibility_rules_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    role_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EligibilityRulesRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let role_id = path_param(role_id)?;
    let payload = json_body(payload)?;

    session
        .catalog()
        .replace_role_eligibility_rules(&user, role_id, payload.rules)
        .await?;
    Ok(Json(ApiResponse::message("Eligibility rules updated.")))
}

pub async fn list_available_db_roles_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let db_roles = session.catalog().list_available_db_roles(&user).await?;
    Ok(Json(ApiResponse::rows(db_roles)))
}

fn role_definition(payload: RoleDefinitionRequest) -> AppResult<RoleDefinitionInput> {
    RoleDefinitionInput::new(
        &payload.role_name,
        payload.description,
        payload.sensitivity_level,
        payload.icon_name,
        payload.icon_color,
    )
}
