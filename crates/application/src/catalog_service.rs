mod audit;
mod roles;
mod teams;
mod users;

use std::sync::Arc;

use serde_json::json;

use jitaccess_core::AppResult;
use jitaccess_domain::UserProfile;

use crate::AuthorizationService;
use crate::gateway_ports::{FetchMode, ProcedureCall, ProcedureGateway, Row};
use crate::procedures;

/// Application service for catalog administration: roles, teams, users and
/// the audit trail. Every operation requires the manager capability.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn ProcedureGateway>,
    authorization_service: AuthorizationService,
}

impl CatalogService {
    /// Creates a service bound to one request-scoped gateway session.
    #[must_use]
    pub fn new(gateway: Arc<dyn ProcedureGateway>) -> Self {
        Self {
            gateway,
            authorization_service: AuthorizationService,
        }
    }

    /// Returns dashboard counters, zeroed when the procedure yields no row.
    pub async fn dashboard_stats(&self, actor: &UserProfile) -> AppResult<Row> {
        let rows = self
            .manager_rows(actor, ProcedureCall::new(procedures::STATS_DASHBOARD)?)
            .await?;

        Ok(rows.into_iter().next().unwrap_or_else(empty_stats))
    }

    /// Returns lookup values used by catalog forms.
    pub async fn lookup_values(&self, actor: &UserProfile) -> AppResult<Vec<Row>> {
        self.manager_rows(actor, ProcedureCall::new(procedures::LOOKUP_VALUES)?)
            .await
    }

    async fn manager_rows(&self, actor: &UserProfile, call: ProcedureCall) -> AppResult<Vec<Row>> {
        self.authorization_service.require_manager(actor)?;
        self.gateway.call_procedure(call, FetchMode::Rows).await
    }

    async fn manager_mutation(&self, actor: &UserProfile, call: ProcedureCall) -> AppResult<()> {
        self.authorization_service.require_manager(actor)?;
        let call = call.param("ActorUserId", &actor.user_id)?;
        self.gateway.call_procedure(call, FetchMode::None).await?;
        Ok(())
    }
}

fn empty_stats() -> Row {
    match json!({
        "activeGrants": 0,
        "totalRoles": 0,
        "sensitiveRoles": 0,
        "totalUsers": 0
    }) {
        serde_json::Value::Object(map) => map,
        _ => Row::new(),
    }
}
