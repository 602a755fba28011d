mod call;
mod identifiers;

use std::sync::Arc;

use async_trait::async_trait;

use jitaccess_core::AppResult;

pub use call::{FetchMode, ProcedureCall, Row, SqlParam};
pub use identifiers::{ParameterName, ProcedureName};

/// Request-scoped access to the database.
///
/// Implementations connect lazily on first use and run every invocation in
/// its own transaction.
#[async_trait]
pub trait ProcedureGateway: Send + Sync {
    /// Executes a stored procedure with named parameters.
    ///
    /// Returns an empty list for [`FetchMode::None`].
    async fn call_procedure(&self, call: ProcedureCall, fetch: FetchMode) -> AppResult<Vec<Row>>;

    /// Executes a parameterized statement using `@P1`, `@P2`, ... placeholders.
    async fn query(&self, sql: &str, parameters: Vec<SqlParam>) -> AppResult<Vec<Row>>;

    /// Releases the underlying connection, if one was opened.
    async fn release(&self) {}
}

/// Opens request-scoped gateway sessions.
pub trait ProcedureGatewayFactory: Send + Sync {
    /// Returns a new session that has not connected yet.
    fn open_session(&self) -> Arc<dyn ProcedureGateway>;
}
