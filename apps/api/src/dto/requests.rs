use serde::Deserialize;
use ts_rs::TS;

/// Incoming payload for a new access request.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-access-request-request.ts"
)]
pub struct CreateAccessRequestRequest {
    pub role_ids: Vec<i64>,
    pub duration_minutes: i64,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub ticket_ref: Option<String>,
}

/// Approve, deny or cancel payload. The body itself is optional.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/decision-request.ts"
)]
pub struct DecisionRequest {
    #[serde(default)]
    pub comment: Option<String>,
}
