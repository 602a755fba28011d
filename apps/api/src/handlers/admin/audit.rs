use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use jitaccess_domain::{AuditLogFilter, DEFAULT_AUDIT_PAGE_SIZE, PageRequest, UserProfile};

use crate::dto::{ApiResponse, AuditLogQuery};
use crate::error::ApiResult;
use crate::extract::query_params;
use crate::state::RequestSession;

pub async fn list_audit_log_handler(
    Extension(session): Extension<RequestSession>,
    Extension(user): Extension<UserProfile>,
    query: Result<Query<AuditLogQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let query = query_params(query)?;
    let page = PageRequest::new(query.page, query.page_size, DEFAULT_AUDIT_PAGE_SIZE)?;
    let filter = AuditLogFilter::new(
        query.search,
        query.event_type,
        query.start_date,
        query.end_date,
    );

    let entries = session.catalog().list_audit_log(&user, filter, page).await?;
    Ok(Json(ApiResponse::rows(entries)))
}
