use jitaccess_core::{AppError, AppResult};
use jitaccess_domain::{Capability, UserProfile};
use tracing::debug;

/// Capability checks against the flags of the resolved user.
///
/// Flags are read from the row loaded for the current request and never
/// cached across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationService;

impl AuthorizationService {
    /// Returns an error when the user lacks the capability.
    pub fn require_capability(&self, user: &UserProfile, capability: Capability) -> AppResult<()> {
        if capability.is_granted_to(user) {
            return Ok(());
        }

        debug!(
            user_id = %user.user_id,
            capability = capability.as_str(),
            "capability check denied"
        );
        Err(AppError::Forbidden(capability.denial_message().to_owned()))
    }

    /// Requires the approver capability.
    pub fn require_approver(&self, user: &UserProfile) -> AppResult<()> {
        self.require_capability(user, Capability::Approver)
    }

    /// Requires the manager capability.
    pub fn require_manager(&self, user: &UserProfile) -> AppResult<()> {
        self.require_capability(user, Capability::Manager)
    }
}

#[cfg(test)]
mod tests;
