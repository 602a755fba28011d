use serde_json::Value;

use jitaccess_core::{AppError, AppResult};
use jitaccess_domain::{IdCsv, RoleDefinitionInput, UserProfile};
use tracing::info;

use crate::gateway_ports::{ProcedureCall, Row};
use crate::procedures;

use super::CatalogService;

impl CatalogService {
    /// Lists roles with usage counters.
    pub async fn list_roles(&self, actor: &UserProfile) -> AppResult<Vec<Row>> {
        self.manager_rows(actor, ProcedureCall::new(procedures::ROLE_LIST_WITH_STATS)?)
            .await
    }

    /// Creates a role.
    pub async fn create_role(&self, actor: &UserProfile, input: RoleDefinitionInput) -> AppResult<()> {
        let call = role_fields(ProcedureCall::new(procedures::ROLE_CREATE)?, &input)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, role_name = input.role_name.as_str(), "role created");
        Ok(())
    }

    /// Updates a role definition.
    pub async fn update_role(
        &self,
        actor: &UserProfile,
        role_id: i64,
        input: RoleDefinitionInput,
    ) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::ROLE_UPDATE)?.param("RoleId", role_id)?;
        let call = role_fields(call, &input)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, role_id, "role updated");
        Ok(())
    }

    /// Deletes a role.
    pub async fn delete_role(&self, actor: &UserProfile, role_id: i64) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::ROLE_DELETE)?.param("RoleId", role_id)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, role_id, "role deleted");
        Ok(())
    }

    /// Enables or disables a role.
    pub async fn set_role_enabled(
        &self,
        actor: &UserProfile,
        role_id: i64,
        is_enabled: bool,
    ) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::ROLE_TOGGLE_ENABLED)?
            .param("RoleId", role_id)?
            .param("IsEnabled", is_enabled)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, role_id, is_enabled, "role toggled");
        Ok(())
    }

    /// Lists users currently holding a role.
    pub async fn list_role_users(&self, actor: &UserProfile, role_id: i64) -> AppResult<Vec<Row>> {
        self.manager_rows(actor, role_call(procedures::ROLE_LIST_USERS, role_id)?)
            .await
    }

    /// Lists database roles mapped to a role.
    pub async fn list_role_db_roles(
        &self,
        actor: &UserProfile,
        role_id: i64,
    ) -> AppResult<Vec<Row>> {
        self.manager_rows(actor, role_call(procedures::ROLE_GET_DB_ROLES, role_id)?)
            .await
    }

    /// Replaces the database roles mapped to a role. An empty set clears it.
    pub async fn replace_role_db_roles(
        &self,
        actor: &UserProfile,
        role_id: i64,
        db_role_ids: &[i64],
    ) -> AppResult<()> {
        let call = role_call(procedures::ROLE_SET_DB_ROLES, role_id)?
            .param("DbRoleIdsCsv", IdCsv::from_integers(db_role_ids).as_str())?;
        self.manager_mutation(actor, call).await?;
        info!(
            actor = %actor.user_id,
            role_id,
            db_role_count = db_role_ids.len(),
            "role database mappings replaced"
        );
        Ok(())
    }

    /// Lists eligibility rules attached to a role.
    pub async fn list_role_eligibility_rules(
        &self,
        actor: &UserProfile,
        role_id: i64,
    ) -> AppResult<Vec<Row>> {
        self.manager_rows(
            actor,
            role_call(procedures::ROLE_GET_ELIGIBILITY_RULES, role_id)?,
        )
        .await
    }

    /// Replaces the eligibility rules attached to a role. Rules are passed
    /// through as a JSON array; their shape is owned by the database.
    pub async fn replace_role_eligibility_rules(
        &self,
        actor: &UserProfile,
        role_id: i64,
        rules: Vec<Value>,
    ) -> AppResult<()> {
        let rule_count = rules.len();
        let rules_json = serde_json::to_string(&Value::Array(rules)).map_err(|error| {
            AppError::Internal(format!("failed to encode eligibility rules: {error}"))
        })?;

        let call = role_call(procedures::ROLE_SET_ELIGIBILITY_RULES, role_id)?
            .param("RulesJson", rules_json)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, role_id, rule_count, "role eligibility rules replaced");
        Ok(())
    }

    /// Lists database roles available for mapping.
    pub async fn list_available_db_roles(&self, actor: &UserProfile) -> AppResult<Vec<Row>> {
        self.manager_rows(actor, ProcedureCall::new(procedures::DB_ROLE_LIST_AVAILABLE)?)
            .await
    }
}

fn role_call(procedure: &str, role_id: i64) -> AppResult<ProcedureCall> {
    ProcedureCall::new(procedure)?.param("RoleId", role_id)
}

fn role_fields(call: ProcedureCall, input: &RoleDefinitionInput) -> AppResult<ProcedureCall> {
    call.param("RoleName", input.role_name.as_str())?
        .param("Description", input.description.as_deref())?
        .param("SensitivityLevel", input.sensitivity_level.as_str())?
        .param("IconName", input.icon_name.as_str())?
        .param("IconColor", input.icon_color.as_str())
}
