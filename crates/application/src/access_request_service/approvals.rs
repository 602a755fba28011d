use serde_json::Value;

use jitaccess_core::{AppError, AppResult};
use jitaccess_domain::{DenialReason, UserProfile};
use tracing::info;

use crate::gateway_ports::{FetchMode, ProcedureCall, Row, SqlParam};
use crate::procedures;

use super::AccessRequestService;

impl AccessRequestService {
    /// Lists pending requests the approver may decide.
    pub async fn list_pending(&self, approver: &UserProfile) -> AppResult<Vec<Row>> {
        self.authorization_service.require_approver(approver)?;

        let call = ProcedureCall::new(procedures::REQUEST_LIST_PENDING_FOR_APPROVER)?
            .param("ApproverUserId", &approver.user_id)?;
        self.gateway.call_procedure(call, FetchMode::Rows).await
    }

    /// Returns one request with requester attributes and a `Roles` array.
    pub async fn request_detail(&self, approver: &UserProfile, request_id: i64) -> AppResult<Row> {
        self.authorization_service.require_approver(approver)?;

        let rows = self
            .gateway
            .query(procedures::REQUEST_DETAIL, vec![SqlParam::from(request_id)])
            .await?;
        let Some(mut detail) = rows.into_iter().next() else {
            return Err(AppError::NotFound(format!(
                "request '{request_id}' does not exist"
            )));
        };

        let call =
            ProcedureCall::new(procedures::REQUEST_GET_ROLES)?.param("RequestId", request_id)?;
        let roles = self.gateway.call_procedure(call, FetchMode::Rows).await?;
        detail.insert(
            "Roles".to_owned(),
            Value::Array(roles.into_iter().map(Value::Object).collect()),
        );

        Ok(detail)
    }

    /// Approves a pending request. A missing comment is recorded as empty.
    pub async fn approve_request(
        &self,
        approver: &UserProfile,
        request_id: i64,
        comment: Option<String>,
    ) -> AppResult<()> {
        self.authorization_service.require_approver(approver)?;

        let call = ProcedureCall::new(procedures::REQUEST_APPROVE)?
            .param("RequestId", request_id)?
            .param("ApproverUserId", &approver.user_id)?
            .param("DecisionComment", comment.unwrap_or_default())?;

        self.gateway.call_procedure(call, FetchMode::None).await?;
        info!(approver_user_id = %approver.user_id, request_id, "access request approved");
        Ok(())
    }

    /// Denies a pending request. A non-blank reason is mandatory.
    pub async fn deny_request(
        &self,
        approver: &UserProfile,
        request_id: i64,
        comment: Option<&str>,
    ) -> AppResult<()> {
        self.authorization_service.require_approver(approver)?;
        let reason = DenialReason::new(comment)?;

        let call = ProcedureCall::new(procedures::REQUEST_DENY)?
            .param("RequestId", request_id)?
            .param("ApproverUserId", &approver.user_id)?
            .param("DecisionComment", reason.as_str())?;

        self.gateway.call_procedure(call, FetchMode::None).await?;
        info!(approver_user_id = %approver.user_id, request_id, "access request denied");
        Ok(())
    }
}
