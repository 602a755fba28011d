use serde::Serialize;
use ts_rs::TS;

/// Failure envelope.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    ok: bool,
    error: String,
}

impl ErrorResponse {
    pub(crate) fn new(error: String) -> Self {
        Self { ok: false, error }
    }
}
