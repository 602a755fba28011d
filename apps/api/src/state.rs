use std::sync::Arc;

use jitaccess_application::{
    AccessRequestService, CatalogService, IdentityService, ProcedureGateway,
    ProcedureGatewayFactory,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway_factory: Arc<dyn ProcedureGatewayFactory>,
    pub identity_service: IdentityService,
    pub allowed_origins: Arc<[String]>,
    pub development_mode: bool,
}

/// Database session owned by a single inbound request.
#[derive(Clone)]
pub struct RequestSession {
    gateway: Arc<dyn ProcedureGateway>,
}

impl RequestSession {
    pub fn new(gateway: Arc<dyn ProcedureGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &dyn ProcedureGateway {
        self.gateway.as_ref()
    }

    pub fn access_requests(&self) -> AccessRequestService {
        AccessRequestService::new(self.gateway.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.gateway.clone())
    }
}
