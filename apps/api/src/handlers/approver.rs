use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Extension, Path};
use jitaccess_domain::UserProfile;

use crate::dto::ApiResponse;
use crate::error::ApiResult;
use crate::extract::path_param;
use crate::state::RequestSession;

pub async fn list_pending_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let pending = session.access_requests().list_pending(&user).await?;
    Ok(Json(ApiResponse::rows(pending)))
}

pub async fn request_detail_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    request_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let request_id = path_param(request_id)?;
    let detail = session
        .access_requests()
        .request_detail(&user, request_id)
        .await?;
    Ok(Json(ApiResponse::row(detail)))
}
