use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jitaccess_application::procedures;
use tracing::warn;

use crate::dto::{ApiResponse, HealthResponse};
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::state::RequestSession;

pub async fn health_handler() -> ApiResult<Json<ApiResponse>> {
    Ok(Json(ApiResponse::encode(&HealthResponse {
        status: "ok",
        database: None,
    })?))
}

/// Runs `SELECT 1` through the request session.
pub async fn readiness_handler(Extension(session): Extension<RequestSession>) -> Response {
    if let Err(error) = session.gateway().query(procedures::PING, Vec::new()).await {
        warn!(error = %error, "readiness check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(format!("database unavailable: {}", error.message()))),
        )
            .into_response();
    }

    match ApiResponse::encode(&HealthResponse {
        status: "ok",
        database: Some("ok"),
    }) {
        Ok(response) => Json(response).into_response(),
        Err(error) => ApiError(error).into_response(),
    }
}
