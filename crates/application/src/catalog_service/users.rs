use jitaccess_core::AppResult;
use jitaccess_domain::{PageRequest, SystemRoleFlags, UserId, UserListFilter, UserProfile};
use tracing::info;

use crate::gateway_ports::{ProcedureCall, Row};
use crate::procedures;

use super::CatalogService;

impl CatalogService {
    /// Lists users matching the filter, one page at a time.
    pub async fn list_users(
        &self,
        actor: &UserProfile,
        filter: UserListFilter,
        page: PageRequest,
    ) -> AppResult<Vec<Row>> {
        let call = ProcedureCall::new(procedures::USER_LIST_PAGINATED)?
            .param("Search", filter.search)?
            .param("Department", filter.department)?
            .param("Role", filter.role)?
            .param("Status", filter.status)?
            .param("PageNumber", page.page())?
            .param("PageSize", page.page_size())?;
        self.manager_rows(actor, call).await
    }

    /// Replaces the system role flags of a user.
    pub async fn update_system_roles(
        &self,
        actor: &UserProfile,
        user_id: &UserId,
        flags: SystemRoleFlags,
    ) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::USER_UPDATE_SYSTEM_ROLES)?
            .param("UserId", user_id)?
            .param("IsAdmin", flags.is_admin)?
            .param("IsApprover", flags.is_approver)?
            .param("IsDataSteward", flags.is_data_steward)?;
        self.manager_mutation(actor, call).await?;
        info!(
            actor = %actor.user_id,
            user_id = %user_id,
            is_admin = flags.is_admin,
            is_approver = flags.is_approver,
            is_data_steward = flags.is_data_steward,
            "system roles updated"
        );
        Ok(())
    }
}
