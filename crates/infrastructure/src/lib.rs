//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_procedure_gateway;
mod sql_server_gateway;
mod sql_server_settings;

pub use in_memory_procedure_gateway::{InMemoryProcedureGateway, InMemoryProcedureGatewayFactory};
pub use sql_server_gateway::SqlServerGatewayFactory;
pub use sql_server_settings::{DEFAULT_SQL_SERVER_PORT, SqlServerSettings};
