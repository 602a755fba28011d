use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use jitaccess_core::AppError;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub(super) fn build_cors_layer(
    origins: &[String],
    identity_header: &str,
) -> Result<CorsLayer, AppError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|error| {
                AppError::Internal(format!("invalid CORS origin '{origin}': {error}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let identity_header = HeaderName::from_bytes(identity_header.as_bytes()).map_err(|error| {
        AppError::Internal(format!("invalid IDENTITY_HEADER '{identity_header}': {error}"))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, identity_header]))
}
