//! Application services and ports.

#![forbid(unsafe_code)]

mod access_request_service;
mod authorization_service;
mod catalog_service;
mod gateway_ports;
mod identity_service;
pub mod procedures;

#[cfg(test)]
mod test_support;

pub use access_request_service::AccessRequestService;
pub use authorization_service::AuthorizationService;
pub use catalog_service::CatalogService;
pub use gateway_ports::{
    FetchMode, ParameterName, ProcedureCall, ProcedureGateway, ProcedureGatewayFactory,
    ProcedureName, Row, SqlParam,
};
pub use identity_service::{
    DEFAULT_IDENTITY_HEADER, DevelopmentSource, ForwardedHeaderSource, IdentityHints,
    IdentityResolver, IdentityService, IdentitySource, IdentitySourceKind, ResolvedLogin,
    WindowsAuthSource,
};
