use jitaccess_application::Row;
use jitaccess_core::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

/// Success envelope shared by every API route.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/api-response.ts"
)]
pub struct ApiResponse {
    pub ok: bool,
    #[ts(type = "unknown")]
    pub data: Value,
    pub message: Option<String>,
}

impl ApiResponse {
    /// Wraps a payload.
    #[must_use]
    pub fn data(data: Value) -> Self {
        Self {
            ok: true,
            data,
            message: None,
        }
    }

    /// Wraps result rows as a JSON array.
    #[must_use]
    pub fn rows(rows: Vec<Row>) -> Self {
        Self::data(Value::Array(rows.into_iter().map(Value::Object).collect()))
    }

    /// Wraps a single row.
    #[must_use]
    pub fn row(row: Row) -> Self {
        Self::data(Value::Object(row))
    }

    /// Serializes a typed payload.
    pub fn encode<T: Serialize>(data: &T) -> AppResult<Self> {
        serde_json::to_value(data)
            .map(Self::data)
            .map_err(|error| AppError::Internal(format!("failed to encode response: {error}")))
    }

    /// Acknowledges a mutation with a human readable message.
    #[must_use]
    pub fn message(message: &str) -> Self {
        Self {
            ok: true,
            data: Value::Null,
            message: Some(message.to_owned()),
        }
    }
}

/// Liveness and readiness payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: Option<&'static str>,
}

/// Development-only view of how the caller was identified.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/identity-debug-response.ts"
)]
pub struct IdentityDebugResponse {
    pub login: String,
    pub source: String,
    pub configured_sources: Vec<String>,
}
