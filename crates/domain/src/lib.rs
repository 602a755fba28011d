//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access_request;
mod capability;
mod catalog;
mod user;

pub use access_request::{AccessRequestInput, DenialReason, RoleIdSet};
pub use capability::Capability;
pub use catalog::{
    AuditLogFilter, DEFAULT_AUDIT_PAGE_SIZE, DEFAULT_ICON_COLOR, DEFAULT_ICON_NAME,
    DEFAULT_SENSITIVITY_LEVEL, DEFAULT_USER_PAGE_SIZE, IdCsv, MAX_PAGE_SIZE, PageRequest,
    RoleDefinitionInput, TeamDefinitionInput, UserListFilter,
};
pub use user::{SystemRoleFlags, UserId, UserProfile};
