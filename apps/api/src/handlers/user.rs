use axum::Json;
use axum::extract::Extension;
use jitaccess_domain::UserProfile;

use crate::dto::ApiResponse;
use crate::error::ApiResult;
use crate::state::RequestSession;

pub async fn me_handler(Extension(user): Extension<UserProfile>) -> ApiResult<Json<ApiResponse>> {
    Ok(Json(ApiResponse::encode(&user)?))
}

pub async fn list_grants_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let grants = session.access_requests().list_active_grants(&user).await?;
    Ok(Json(ApiResponse::rows(grants)))
}

pub async fn list_own_requests_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let requests = session.access_requests().list_own_requests(&user).await?;
    Ok(Json(ApiResponse::rows(requests)))
}

pub async fn list_requestable_roles_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
) -> ApiResult<Json<ApiResponse>> {
    let roles = session
        .access_requests()
        .list_requestable_roles(&user)
        .await?;
    Ok(Json(ApiResponse::rows(roles)))
}
