mod approvals;

use std::sync::Arc;

use jitaccess_core::AppResult;
use jitaccess_domain::{AccessRequestInput, UserProfile};
use tracing::info;

use crate::AuthorizationService;
use crate::gateway_ports::{FetchMode, ProcedureCall, ProcedureGateway, Row};
use crate::procedures;

/// Application service for the request and grant workflow.
///
/// State transitions are enforced by the stored procedures; this service
/// gates them by capability and validates payloads before any call.
#[derive(Clone)]
pub struct AccessRequestService {
    gateway: Arc<dyn ProcedureGateway>,
    authorization_service: AuthorizationService,
}

impl AccessRequestService {
    /// Creates a service bound to one request-scoped gateway session.
    #[must_use]
    pub fn new(gateway: Arc<dyn ProcedureGateway>) -> Self {
        Self {
            gateway,
            authorization_service: AuthorizationService,
        }
    }

    /// Lists grants currently active for the user.
    pub async fn list_active_grants(&self, user: &UserProfile) -> AppResult<Vec<Row>> {
        self.list_for_user(procedures::GRANT_LIST_ACTIVE_FOR_USER, user)
            .await
    }

    /// Lists requests submitted by the user.
    pub async fn list_own_requests(&self, user: &UserProfile) -> AppResult<Vec<Row>> {
        self.list_for_user(procedures::REQUEST_LIST_FOR_USER, user)
            .await
    }

    /// Lists roles the user may request.
    pub async fn list_requestable_roles(&self, user: &UserProfile) -> AppResult<Vec<Row>> {
        self.list_for_user(procedures::ROLE_LIST_REQUESTABLE, user)
            .await
    }

    /// Submits a request for one or more roles.
    pub async fn submit_request(
        &self,
        user: &UserProfile,
        input: AccessRequestInput,
    ) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::REQUEST_CREATE)?
            .param("UserId", &user.user_id)?
            .param("RoleIds", input.role_ids().to_csv())?
            .param("RequestedDurationMinutes", input.duration_minutes())?
            .param("Justification", input.justification())?
            .param("TicketRef", input.ticket_ref())?;

        self.gateway.call_procedure(call, FetchMode::None).await?;
        info!(
            user_id = %user.user_id,
            role_count = input.role_ids().as_slice().len(),
            "access request submitted"
        );
        Ok(())
    }

    /// Cancels one of the user's own requests.
    pub async fn cancel_request(&self, user: &UserProfile, request_id: i64) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::REQUEST_CANCEL)?
            .param("RequestId", request_id)?
            .param("UserId", &user.user_id)?;

        self.gateway.call_procedure(call, FetchMode::None).await?;
        info!(user_id = %user.user_id, request_id, "access request cancelled");
        Ok(())
    }

    async fn list_for_user(&self, procedure: &str, user: &UserProfile) -> AppResult<Vec<Row>> {
        let call = ProcedureCall::new(procedure)?.param("UserId", &user.user_id)?;
        self.gateway.call_procedure(call, FetchMode::Rows).await
    }
}

#[cfg(test)]
mod tests;
