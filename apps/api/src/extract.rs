//! Extractor helpers that keep rejections inside the JSON failure envelope.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use jitaccess_core::AppError;
use serde::de::DeserializeOwned;

/// Unwraps a JSON body, mapping rejections to validation errors.
pub fn json_body<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(value)| value)
        .map_err(|error| AppError::Validation(error.body_text()))
}

/// Parses an optional JSON body. An empty body yields the default payload.
pub fn optional_json_body<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|error| AppError::Validation(format!("invalid request body: {error}")))
}

/// Unwraps a path parameter.
pub fn path_param<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(value)| value)
        .map_err(|error| AppError::Validation(error.body_text()))
}

/// Unwraps a query string.
pub fn query_params<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(value)| value)
        .map_err(|error| AppError::Validation(error.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use jitaccess_core::AppError;

    use super::optional_json_body;
    use crate::dto::DecisionRequest;

    #[test]
    fn empty_body_is_the_default_payload() {
        let payload = optional_json_body::<DecisionRequest>(&Bytes::from_static(b"  "));
        assert!(matches!(payload, Ok(DecisionRequest { comment: None })));
    }

    #[test]
    fn malformed_body_is_a_validation_error() {
        let payload = optional_json_body::<DecisionRequest>(&Bytes::from_static(b"{\"comment\":"));
        assert!(matches!(payload, Err(AppError::Validation(_))));
    }

    #[test]
    fn comment_is_read_when_present() {
        let payload =
            optional_json_body::<DecisionRequest>(&Bytes::from_static(b"{\"comment\":\"ok\"}"));
        assert!(matches!(payload, Ok(DecisionRequest { comment: Some(comment) }) if comment == "ok"));
    }
}
