use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path};
use jitaccess_domain::{AccessRequestInput, UserProfile};

use crate::dto::{ApiResponse, CreateAccessRequestRequest, DecisionRequest};
use crate::error::ApiResult;
use crate::extract::{json_body, optional_json_body, path_param};
use crate::state::RequestSession;

pub async fn create_request_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    payload: Result<Json<CreateAccessRequestRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let payload = json_body(payload)?;
    let input = AccessRequestInput::new(
        payload.role_ids,
        payload.duration_minutes,
        payload.justification,
        payload.ticket_ref,
    )?;

    session.access_requests().submit_request(&user, input).await?;
    Ok(Json(ApiResponse::message("Request submitted successfully.")))
}

pub async fn cancel_request_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    request_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let request_id = path_param(request_id)?;

    session
        .access_requests()
        .cancel_request(&user, request_id)
        .await?;
    Ok(Json(ApiResponse::message("Request cancelled successfully.")))
}

pub async fn approve_request_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    request_id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse>> {
    let request_id = path_param(request_id)?;
    let payload = optional_json_body::<DecisionRequest>(&body)?;

    session
        .access_requests()
        .approve_request(&user, request_id, payload.comment)
        .await?;
    Ok(Json(ApiResponse::message("Request approved successfully.")))
}

pub async fn deny_request_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    request_id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse>> {
    let request_id = path_param(request_id)?;
    let payload = optional_json_body::<DecisionRequest>(&body)?;

    session
        .access_requests()
        .deny_request(&user, request_id, payload.comment.as_deref())
        .await?;
    Ok(Json(ApiResponse::message("Request denied.")))
}
