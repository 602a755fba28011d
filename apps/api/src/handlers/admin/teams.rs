use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path};
use jitaccess_core::AppResult;
use jitaccess_domain::{TeamDefinitionInput, UserProfile};

use crate::dto::{ApiResponse, TeamDefinitionRequest, TeamMembersRequest};
use crate::error::ApiResult;
use crate::extract::{json_body, path_param};
use crate::state::RequestSession;

pub async fn list_teams_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let teams = session.catalog().list_teams(&user).await?;
    Ok(Json(ApiResponse::rows(teams)))
}

pub async fn create_team_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    payload: Result<Json<TeamDefinitionRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let input = team_definition(json_body(payload)?)?;

    session.catalog().create_team(&user, input).await?;
    Ok(Json(ApiResponse::message("Team created.")))
}

pub async fn update_team_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    team_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TeamDefinitionRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let team_id = path_param(team_id)?;
    let input = team_definition(json_body(payload)?)?;

    session.catalog().update_team(&user, team_id, input).await?;
    Ok(Json(ApiResponse::message("Team updated.")))
}

pub async fn delete_team_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    team_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let team_id = path_param(team_id)?;

    session.catalog().delete_team(&user, team_id).await?;
    Ok(Json(ApiResponse::message("Team deleted.")))
}

pub async fn list_team_members_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    team_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let team_id = path_param(team_id)?;
    let members = session.catalog().list_team_members(&user, team_id).await?;
    Ok(Json(ApiResponse::rows(members)))
}

pub async fn replace_team_members_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    team_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TeamMembersRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let team_id = path_param(team_id)?;
    let user_ids = json_body(payload)?
        .user_ids
        .into_iter()
        .map(|user_id| user_id.as_str().to_owned())
        .collect::<Vec<_>>();

    session
        .catalog()
        .replace_team_members(&user, team_id, &user_ids)
        .await?;
    Ok(Json(ApiResponse::message("Team members updated.")))
}

fn team_definition(payload: TeamDefinitionRequest) -> AppResult<TeamDefinitionInput> {
    TeamDefinitionInput::new(&payload.team_name, payload.description, payload.department)
}
