use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use jitaccess_core::{AppError, AppResult};
use jitaccess_domain::UserProfile;

use crate::gateway_ports::{FetchMode, ProcedureCall, ProcedureGateway, Row, SqlParam};

/// Scripted gateway recording every invocation.
#[derive(Default)]
pub(crate) struct FakeGateway {
    pub(crate) calls: Mutex<Vec<(ProcedureCall, FetchMode)>>,
    pub(crate) queries: Mutex<Vec<(String, Vec<SqlParam>)>>,
    procedure_rows: HashMap<String, Vec<Row>>,
    procedure_failures: HashMap<String, String>,
    query_rows: Vec<Row>,
}

impl FakeGateway {
    pub(crate) fn with_rows(mut self, procedure: &str, rows: Vec<Value>) -> Self {
        self.procedure_rows
            .insert(procedure.to_owned(), rows.into_iter().map(row).collect());
        self
    }

    pub(crate) fn with_query_rows(mut self, rows: Vec<Value>) -> Self {
        self.query_rows = rows.into_iter().map(row).collect();
        self
    }

    pub(crate) fn failing(mut self, procedure: &str, message: &str) -> Self {
        self.procedure_failures
            .insert(procedure.to_owned(), message.to_owned());
        self
    }

    pub(crate) async fn procedure_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|(call, _)| call.name().as_str().to_owned())
            .collect()
    }

    pub(crate) async fn only_call(&self) -> (ProcedureCall, FetchMode) {
        let calls = self.calls.lock().await;
        assert_eq!(calls.len(), 1, "expected exactly one procedure call");
        match calls.first() {
            Some(call) => call.clone(),
            None => panic!("expected a procedure call"),
        }
    }
}

#[async_trait]
impl ProcedureGateway for FakeGateway {
    async fn call_procedure(&self, call: ProcedureCall, fetch: FetchMode) -> AppResult<Vec<Row>> {
        let name = call.name().as_str().to_owned();
        self.calls.lock().await.push((call, fetch));

        if let Some(message) = self.procedure_failures.get(&name) {
            return Err(AppError::Database(message.clone()));
        }

        Ok(match fetch {
            FetchMode::None => Vec::new(),
            FetchMode::Rows => self.procedure_rows.get(&name).cloned().unwrap_or_default(),
        })
    }

    async fn query(&self, sql: &str, parameters: Vec<SqlParam>) -> AppResult<Vec<Row>> {
        self.queries.lock().await.push((sql.to_owned(), parameters));
        Ok(self.query_rows.clone())
    }
}

pub(crate) fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

pub(crate) fn user(flags: Value) -> UserProfile {
    let mut fields = row(json!({ "UserId": "7", "LoginName": "CORP\\alice", "IsActive": true }));
    fields.extend(row(flags));
    match UserProfile::from_row(fields) {
        Ok(user) => user,
        Err(error) => panic!("test user should parse: {error}"),
    }
}
