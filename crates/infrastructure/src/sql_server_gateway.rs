mod row_mapping;

use std::sync::Arc;

use async_trait::async_trait;
use tiberius::{Client, Config, Query};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, warn};

use jitaccess_application::{
    FetchMode, ProcedureCall, ProcedureGateway, ProcedureGatewayFactory, Row, SqlParam,
};
use jitaccess_core::{AppError, AppResult};

use crate::SqlServerSettings;

use row_mapping::row_to_json;

type SqlClient = Client<Compat<TcpStream>>;

/// Opens request-scoped SQL Server sessions.
#[derive(Debug, Clone)]
pub struct SqlServerGatewayFactory {
    settings: Arc<SqlServerSettings>,
}

impl SqlServerGatewayFactory {
    /// Creates a factory from connection settings.
    #[must_use]
    pub fn new(settings: SqlServerSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

impl ProcedureGatewayFactory for SqlServerGatewayFactory {
    fn open_session(&self) -> Arc<dyn ProcedureGateway> {
        Arc::new(SqlServerSession {
            settings: self.settings.clone(),
            client: Mutex::new(None),
        })
    }
}

/// One lazily connected SQL Server connection owned by a single request.
struct SqlServerSession {
    settings: Arc<SqlServerSettings>,
    client: Mutex<Option<SqlClient>>,
}

impl SqlServerSession {
    async fn run(
        &self,
        statement: &str,
        parameters: &[SqlParam],
        fetch: FetchMode,
    ) -> AppResult<Vec<Row>> {
        let mut guard = self.client.lock().await;
        if guard.is_none() {
            *guard = Some(connect(&self.settings).await?);
        }
        let Some(client) = guard.as_mut() else {
            return Err(AppError::Internal(
                "sql server session lost its connection".to_owned(),
            ));
        };

        match run_in_transaction(client, statement, parameters, fetch).await {
            Ok(rows) => Ok(rows),
            Err(error) => {
                warn!(error = %error, "statement failed, rolling back");
                if let Err(rollback_error) =
                    simple_statement(client, "IF @@TRANCOUNT > 0 ROLLBACK TRANSACTION").await
                {
                    warn!(error = %rollback_error, "rollback failed, discarding connection");
                    *guard = None;
                }
                Err(database_error(error))
            }
        }
    }
}

#[async_trait]
impl ProcedureGateway for SqlServerSession {
    async fn call_procedure(&self, call: ProcedureCall, fetch: FetchMode) -> AppResult<Vec<Row>> {
        debug!(
            procedure = %call.name(),
            parameters = ?call.parameter_names().collect::<Vec<_>>(),
            fetch = ?fetch,
            "executing stored procedure"
        );

        let parameters = call.values().cloned().collect::<Vec<_>>();
        self.run(&call.statement(), &parameters, fetch).await
    }

    async fn query(&self, sql: &str, parameters: Vec<SqlParam>) -> AppResult<Vec<Row>> {
        debug!(parameter_count = parameters.len(), "executing query");
        self.run(sql, &parameters, FetchMode::Rows).await
    }

    async fn release(&self) {
        let Some(client) = self.client.lock().await.take() else {
            return;
        };

        if let Err(error) = client.close().await {
            debug!(error = %error, "failed to close sql server connection");
        }
    }
}

async fn connect(settings: &SqlServerSettings) -> AppResult<SqlClient> {
    debug!(
        host = %settings.host,
        port = settings.port,
        database = %settings.database,
        "connecting to sql server"
    );

    match timeout(settings.connect_timeout, open_client(settings.to_config())).await {
        Ok(result) => result.map_err(database_error),
        Err(_) => Err(AppError::Database(format!(
            "timed out connecting to {}:{} after {}s",
            settings.host,
            settings.port,
            settings.connect_timeout.as_secs()
        ))),
    }
}

async fn open_client(config: Config) -> tiberius::Result<SqlClient> {
    let tcp = TcpStream::connect(config.get_addr()).await?;
    tcp.set_nodelay(true)?;

    match Client::connect(config.clone(), tcp.compat_write()).await {
        Err(tiberius::error::Error::Routing { host, port }) => {
            let mut config = config;
            config.host(&host);
            config.port(port);

            let tcp = TcpStream::connect(config.get_addr()).await?;
            tcp.set_nodelay(true)?;
            Client::connect(config, tcp.compat_write()).await
        }
        other => other,
    }
}

async fn run_in_transaction(
    client: &mut SqlClient,
    statement: &str,
    parameters: &[SqlParam],
    fetch: FetchMode,
) -> tiberius::Result<Vec<Row>> {
    simple_statement(client, "BEGIN TRANSACTION").await?;

    let mut query = Query::new(statement.to_owned());
    for parameter in parameters {
        bind(&mut query, parameter);
    }

    let rows = match fetch {
        FetchMode::None => {
            query.execute(client).await?;
            Vec::new()
        }
        FetchMode::Rows => {
            let result_sets = query.query(client).await?.into_results().await?;
            result_sets
                .into_iter()
                .flatten()
                .map(row_to_json)
                .collect::<tiberius::Result<Vec<_>>>()?
        }
    };

    simple_statement(client, "COMMIT TRANSACTION").await?;
    Ok(rows)
}

async fn simple_statement(client: &mut SqlClient, statement: &str) -> tiberius::Result<()> {
    client.simple_query(statement).await?.into_results().await?;
    Ok(())
}

fn bind(query: &mut Query<'_>, parameter: &SqlParam) {
    match parameter {
        SqlParam::Null => query.bind(Option::<String>::None),
        SqlParam::Bool(value) => query.bind(*value),
        SqlParam::Int(value) => query.bind(*value),
        SqlParam::Text(value) => query.bind(value.clone()),
    }
}

/// Server errors keep the procedure's message verbatim.
fn database_error(error: tiberius::error::Error) -> AppError {
    match error {
        tiberius::error::Error::Server(token) => AppError::Database(token.message().to_owned()),
        other => AppError::Database(other.to_string()),
    }
}
