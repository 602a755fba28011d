use jitaccess_core::AppResult;
use jitaccess_domain::{IdCsv, TeamDefinitionInput, UserProfile};
use tracing::info;

use crate::gateway_ports::{ProcedureCall, Row};
use crate::procedures;

use super::CatalogService;

impl CatalogService {
    /// Lists teams with member counters.
    pub async fn list_teams(&self, actor: &UserProfile) -> AppResult<Vec<Row>> {
        self.manager_rows(actor, ProcedureCall::new(procedures::TEAM_LIST_WITH_STATS)?)
            .await
    }

    /// Creates a team.
    pub async fn create_team(&self, actor: &UserProfile, input: TeamDefinitionInput) -> AppResult<()> {
        let call = team_fields(ProcedureCall::new(procedures::TEAM_CREATE)?, &input)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, team_name = input.team_name.as_str(), "team created");
        Ok(())
    }

    /// Updates a team.
    pub async fn update_team(
        &self,
        actor: &UserProfile,
        team_id: i64,
        input: TeamDefinitionInput,
    ) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::TEAM_UPDATE)?.param("TeamId", team_id)?;
        let call = team_fields(call, &input)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, team_id, "team updated");
        Ok(())
    }

    /// Deletes a team.
    pub async fn delete_team(&self, actor: &UserProfile, team_id: i64) -> AppResult<()> {
        let call = ProcedureCall::new(procedures::TEAM_DELETE)?.param("TeamId", team_id)?;
        self.manager_mutation(actor, call).await?;
        info!(actor = %actor.user_id, team_id, "team deleted");
        Ok(())
    }

    /// Lists members of a team.
    pub async fn list_team_members(&self, actor: &UserProfile, team_id: i64) -> AppResult<Vec<Row>> {
        let call = ProcedureCall::new(procedures::TEAM_GET_MEMBERS)?.param("TeamId", team_id)?;
        self.manager_rows(actor, call).await
    }

    /// Replaces the members of a team. An empty set removes everyone.
    pub async fn replace_team_members(
        &self,
        actor: &UserProfile,
        team_id: i64,
        user_ids: &[String],
    ) -> AppResult<()> {
        let members = IdCsv::from_texts(user_ids, "userIds")?;
        let call = ProcedureCall::new(procedures::TEAM_SET_MEMBERS)?
            .param("TeamId", team_id)?
            .param("UserIdsCsv", members.as_str())?;
        self.manager_mutation(actor, call).await?;
        info!(
            actor = %actor.user_id,
            team_id,
            member_count = user_ids.len(),
            "team members replaced"
        );
        Ok(())
    }
}

fn team_fields(call: ProcedureCall, input: &TeamDefinitionInput) -> AppResult<ProcedureCall> {
    call.param("TeamName", input.team_name.as_str())?
        .param("Description", input.description.as_deref())?
        .param("Department", input.department.as_deref())
}
