mod catalog;
mod common;
mod requests;

pub use catalog::{
    AuditLogQuery, DbRoleMappingRequest, EligibilityRulesRequest, RoleDefinitionRequest,
    SystemRolesRequest, TeamDefinitionRequest, TeamMembersRequest, ToggleRoleRequest,
    UserListQuery,
};
pub use common::{ApiResponse, HealthResponse, IdentityDebugResponse};
pub use requests::{CreateAccessRequestRequest, DecisionRequest};

#[cfg(test)]
mod tests {
    use super::{
        ApiResponse, AuditLogQuery, CreateAccessRequestRequest, DbRoleMappingRequest,
        DecisionRequest, EligibilityRulesRequest, HealthResponse, IdentityDebugResponse,
        RoleDefinitionRequest, SystemRolesRequest, TeamDefinitionRequest, TeamMembersRequest,
        ToggleRoleRequest, UserListQuery,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        ApiResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;
        IdentityDebugResponse::export(&config)?;
        CreateAccessRequestRequest::export(&config)?;
        DecisionRequest::export(&config)?;
        RoleDefinitionRequest::export(&config)?;
        ToggleRoleRequest::export(&config)?;
        DbRoleMappingRequest::export(&config)?;
        EligibilityRulesRequest::export(&config)?;
        TeamDefinitionRequest::export(&config)?;
        TeamMembersRequest::export(&config)?;
        SystemRolesRequest::export(&config)?;
        UserListQuery::export(&config)?;
        AuditLogQuery::export(&config)?;

        Ok(())
    }

    fn export_dir<T: TS>() -> Option<String> {
        T::output_path()
            .and_then(|path| path.parent().map(|parent| parent.to_string_lossy().into_owned()))
    }

    #[test]
    fn bindings_share_one_export_directory() {
        let expected = Some("../../../packages/api-types/src/generated".to_owned());

        for actual in [
            export_dir::<ApiResponse>(),
            export_dir::<ErrorResponse>(),
            export_dir::<HealthResponse>(),
            export_dir::<IdentityDebugResponse>(),
            export_dir::<CreateAccessRequestRequest>(),
            export_dir::<DecisionRequest>(),
            export_dir::<RoleDefinitionRequest>(),
            export_dir::<ToggleRoleRequest>(),
            export_dir::<DbRoleMappingRequest>(),
            export_dir::<EligibilityRulesRequest>(),
            export_dir::<TeamDefinitionRequest>(),
            export_dir::<TeamMembersRequest>(),
            export_dir::<SystemRolesRequest>(),
            export_dir::<UserListQuery>(),
            export_dir::<AuditLogQuery>(),
        ] {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn message_envelope_has_null_data() {
        let value = serde_json::to_value(ApiResponse::message("Request denied."));

        assert_eq!(
            value.ok(),
            Some(serde_json::json!({
                "ok": true,
                "data": null,
                "message": "Request denied."
            }))
        );
    }

    #[test]
    fn team_members_accept_numeric_ids() {
        let payload =
            serde_json::from_value::<TeamMembersRequest>(serde_json::json!({ "userIds": [7, "8"] }));

        let Ok(payload) = payload else {
            panic!("payload should deserialize");
        };
        let ids = payload
            .user_ids
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["7", "8"]);
    }
}
