use jitaccess_core::AppResult;
use jitaccess_domain::{AuditLogFilter, PageRequest, UserProfile};

use crate::gateway_ports::{ProcedureCall, Row};
use crate::procedures;

use super::CatalogService;

impl CatalogService {
    /// Lists audit log entries matching the filter, one page at a time.
    pub async fn list_audit_log(
        &self,
        actor: &UserProfile,
        filter: AuditLogFilter,
        page: PageRequest,
    ) -> AppResult<Vec<Row>> {
        let call = ProcedureCall::new(procedures::AUDIT_LOG_LIST_PAGINATED)?
            .param("Search", filter.search)?
            .param("EventType", filter.event_type)?
            .param("StartDate", filter.start_date)?
            .param("EndDate", filter.end_date)?
            .param("PageNumber", page.page())?
            .param("PageSize", page.page_size())?;
        self.manager_rows(actor, call).await
    }
}
