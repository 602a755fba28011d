//! JIT access HTTP API.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use jitaccess_application::{IdentityService, ProcedureGatewayFactory, procedures};
use jitaccess_core::AppError;
use jitaccess_infrastructure::SqlServerGatewayFactory;
use tracing::{error, info};

use crate::api_config::{ApiCommand, ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    info!(
        app_env = %config.app_env,
        development_mode = config.development_mode,
        database = ?config.sql_server,
        "configuration loaded"
    );

    let gateway_factory: Arc<dyn ProcedureGatewayFactory> =
        Arc::new(SqlServerGatewayFactory::new(config.sql_server.clone()));

    match config.command {
        ApiCommand::CheckDb => check_database(gateway_factory.as_ref()).await,
        ApiCommand::Serve => serve(config, gateway_factory).await,
    }
}

async fn serve(
    config: ApiConfig,
    gateway_factory: Arc<dyn ProcedureGatewayFactory>,
) -> Result<(), AppError> {
    let identity_resolver = config.identity_resolver();
    info!(
        sources = ?identity_resolver.source_kinds(),
        header = %config.identity_header,
        "identity strategies configured"
    );

    let app_state = AppState {
        gateway_factory,
        identity_service: IdentityService::new(identity_resolver),
        allowed_origins: Arc::from(config.cors_origins.clone()),
        development_mode: config.development_mode,
    };
    let app = api_router::build_router(app_state, &config.identity_header)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "jitaccess-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

/// Opens one session, runs `SELECT 1` and reports the outcome.
async fn check_database(gateway_factory: &dyn ProcedureGatewayFactory) -> Result<(), AppError> {
    let session = gateway_factory.open_session();
    let result = session.query(procedures::PING, Vec::new()).await;
    session.release().await;

    match result {
        Ok(rows) => {
            info!(rows = rows.len(), "database connection ok");
            Ok(())
        }
        Err(check_error) => {
            error!(error = %check_error, "database connection failed");
            Err(check_error)
        }
    }
}
