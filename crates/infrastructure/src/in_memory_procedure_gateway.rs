use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use jitaccess_application::{
    FetchMode, ProcedureCall, ProcedureGateway, ProcedureGatewayFactory, Row, SqlParam,
    procedures,
};
use jitaccess_core::{AppError, AppResult};

/// In-memory gateway with scripted procedure results.
///
/// The active user lookup is answered from the seeded user rows with the same
/// exact-or-domain-suffix matching the database query performs. Every
/// procedure invocation is recorded.
#[derive(Debug, Default)]
pub struct InMemoryProcedureGateway {
    users: RwLock<Vec<Row>>,
    procedure_rows: RwLock<HashMap<String, Vec<Row>>>,
    procedure_errors: RwLock<HashMap<String, String>>,
    query_rows: RwLock<HashMap<String, Vec<Row>>>,
    calls: RwLock<Vec<(ProcedureCall, FetchMode)>>,
    unavailable: RwLock<bool>,
    releases: AtomicUsize,
}

impl InMemoryProcedureGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a `jit.Users` row.
    #[must_use]
    pub fn with_user(mut self, user: Value) -> Self {
        self.users.get_mut().push(into_row(user));
        self
    }

    /// Scripts the rows returned by a procedure.
    #[must_use]
    pub fn with_procedure_rows(mut self, procedure: &str, rows: Vec<Value>) -> Self {
        self.procedure_rows
            .get_mut()
            .insert(procedure.to_owned(), rows.into_iter().map(into_row).collect());
        self
    }

    /// Scripts a procedure failure surfaced as a database error.
    #[must_use]
    pub fn with_procedure_error(mut self, procedure: &str, message: &str) -> Self {
        self.procedure_errors
            .get_mut()
            .insert(procedure.to_owned(), message.to_owned());
        self
    }

    /// Scripts the rows returned by an ad hoc statement.
    #[must_use]
    pub fn with_query_rows(mut self, sql: &str, rows: Vec<Value>) -> Self {
        self.query_rows
            .get_mut()
            .insert(sql.to_owned(), rows.into_iter().map(into_row).collect());
        self
    }

    /// Makes every invocation fail as if the server were unreachable.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Returns recorded procedure invocations in call order.
    pub async fn calls(&self) -> Vec<(ProcedureCall, FetchMode)> {
        self.calls.read().await.clone()
    }

    /// Returns how many sessions were released.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    async fn ensure_available(&self) -> AppResult<()> {
        if *self.unavailable.read().await {
            return Err(AppError::Database("database is unavailable".to_owned()));
        }

        Ok(())
    }

    async fn find_users(&self, parameters: &[SqlParam]) -> Vec<Row> {
        let Some(SqlParam::Text(login)) = parameters.first() else {
            return Vec::new();
        };
        let suffix = format!("\\{}", login.to_lowercase());
        let login = login.to_lowercase();

        let users = self.users.read().await;
        let mut matches = users
            .iter()
            .filter(|user| user.get("IsActive").and_then(Value::as_bool).unwrap_or(true))
            .filter_map(|user| {
                let stored = user.get("LoginName").and_then(Value::as_str)?.to_lowercase();
                if stored == login {
                    Some((0, user.clone()))
                } else if stored.ends_with(&suffix) {
                    Some((1, user.clone()))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        matches.sort_by_key(|(rank, _)| *rank);
        matches.into_iter().take(1).map(|(_, user)| user).collect()
    }
}

#[async_trait]
impl ProcedureGateway for InMemoryProcedureGateway {
    async fn call_procedure(&self, call: ProcedureCall, fetch: FetchMode) -> AppResult<Vec<Row>> {
        self.ensure_available().await?;

        let name = call.name().as_str().to_owned();
        self.calls.write().await.push((call, fetch));

        if let Some(message) = self.procedure_errors.read().await.get(&name) {
            return Err(AppError::Database(message.clone()));
        }

        Ok(match fetch {
            FetchMode::None => Vec::new(),
            FetchMode::Rows => self
                .procedure_rows
                .read()
                .await
                .get(&name)
                .cloned()
                .unwrap_or_default(),
        })
    }

    async fn query(&self, sql: &str, parameters: Vec<SqlParam>) -> AppResult<Vec<Row>> {
        self.ensure_available().await?;

        if sql == procedures::FIND_ACTIVE_USER_BY_LOGIN {
            return Ok(self.find_users(&parameters).await);
        }
        if sql == procedures::PING {
            return Ok(vec![into_row(serde_json::json!({ "Ok": 1 }))]);
        }

        Ok(self
            .query_rows
            .read()
            .await
            .get(sql)
            .cloned()
            .unwrap_or_default())
    }

    async fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out one shared in-memory gateway for every request.
#[derive(Debug, Clone)]
pub struct InMemoryProcedureGatewayFactory {
    gateway: Arc<InMemoryProcedureGateway>,
}

impl InMemoryProcedureGatewayFactory {
    /// Creates a factory around a shared gateway.
    #[must_use]
    pub fn new(gateway: Arc<InMemoryProcedureGateway>) -> Self {
        Self { gateway }
    }
}

impl ProcedureGatewayFactory for InMemoryProcedureGatewayFactory {
    fn open_session(&self) -> Arc<dyn ProcedureGateway> {
        self.gateway.clone()
    }
}

fn into_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}
