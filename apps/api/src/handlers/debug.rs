use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::dto::{ApiResponse, IdentityDebugResponse};
use crate::error::ApiResult;
use crate::middleware::identity_hints;
use crate::state::AppState;

/// Reports which strategy identified the caller. Only routed in development mode.
pub async fn identity_debug_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse>> {
    let resolver = state.identity_service.resolver();
    let resolved = resolver.resolve(&identity_hints(&headers))?;

    let response = IdentityDebugResponse {
        login: resolved.login.as_str().to_owned(),
        source: resolved.source.as_str().to_owned(),
        configured_sources: resolver
            .source_kinds()
            .iter()
            .map(|kind| kind.as_str().to_owned())
            .collect(),
    };

    Ok(Json(ApiResponse::encode(&response)?))
}
