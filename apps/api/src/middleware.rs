use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use jitaccess_application::{AuthorizationService, IdentityHints};
use jitaccess_core::AppError;
use jitaccess_domain::UserProfile;

use crate::error::ApiResult;
use crate::state::{AppState, RequestSession};

/// Opens a lazily connected session for the request and releases it once the
/// response has been produced.
pub async fn open_request_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let gateway = state.gateway_factory.open_session();
    request
        .extensions_mut()
        .insert(RequestSession::new(gateway.clone()));

    let response = next.run(request).await;
    gateway.release().await;
    response
}

pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let session = request_session(&request)?;
    let hints = identity_hints(request.headers());
    let user = state
        .identity_service
        .current_user(session.gateway(), &hints)
        .await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn require_approver(request: Request, next: Next) -> ApiResult<Response> {
    AuthorizationService.require_approver(current_user(&request)?)?;
    Ok(next.run(request).await)
}

pub async fn require_manager(request: Request, next: Next) -> ApiResult<Response> {
    AuthorizationService.require_manager(current_user(&request)?)?;
    Ok(next.run(request).await)
}

/// Rejects browser mutations from other sites unless their origin is allowed.
pub async fn reject_cross_site_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();
        let is_cross_site = headers
            .get("sec-fetch-site")
            .is_some_and(|value| value == HeaderValue::from_static("cross-site"));

        if is_cross_site {
            let origin = headers
                .get(header::ORIGIN)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            let origin_is_allowed = state
                .allowed_origins
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(origin));

            if !origin_is_allowed {
                return Err(AppError::Forbidden("Cross-site request blocked.".to_owned()).into());
            }
        }
    }

    Ok(next.run(request).await)
}

/// Collects request headers as identity hints.
pub fn identity_hints(headers: &HeaderMap) -> IdentityHints {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        })
        .collect()
}

fn request_session(request: &Request) -> Result<RequestSession, AppError> {
    request
        .extensions()
        .get::<RequestSession>()
        .cloned()
        .ok_or_else(|| AppError::Internal("request session is not open".to_owned()))
}

fn current_user(request: &Request) -> Result<&UserProfile, AppError> {
    request
        .extensions()
        .get::<UserProfile>()
        .ok_or_else(|| AppError::Internal("caller identity was not resolved".to_owned()))
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
