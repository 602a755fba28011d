//! Shared primitives for all Rust crates in the JIT access service.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::LoginName;

/// Result type used across JIT access crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Creates a validated string after trimming surrounding whitespace.
    pub fn trimmed(value: &str, field_name: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(format!("{field_name} is required")));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// No caller identity could be resolved from the request.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Identity was resolved but no active user account matches it.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// User is authenticated but lacks the required capability.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A procedure or parameter name failed the identifier allow-list.
    #[error("unsafe identifier: {0}")]
    UnsafeIdentifier(String),

    /// Database driver or stored procedure failure, message kept verbatim.
    #[error("database error: {0}")]
    Database(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether the error is caused by the caller rather than the server.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated(_)
                | Self::UserNotFound(_)
                | Self::Forbidden(_)
                | Self::Validation(_)
                | Self::NotFound(_)
        )
    }

    /// Returns the carried message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated(message)
            | Self::UserNotFound(message)
            | Self::Forbidden(message)
            | Self::Validation(message)
            | Self::NotFound(message)
            | Self::UnsafeIdentifier(message)
            | Self::Database(message)
            | Self::Internal(message) => message,
        }
    }
}
