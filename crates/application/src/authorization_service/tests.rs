use serde_json::json;

use jitaccess_core::AppError;

use crate::test_support::user;

use super::AuthorizationService;

#[test]
fn admin_is_approver_and_manager() {
    let admin = user(json!({ "IsAdmin": true }));
    let service = AuthorizationService;

    assert!(service.require_approver(&admin).is_ok());
    assert!(service.require_manager(&admin).is_ok());
}

#[test]
fn approver_is_not_manager() {
    let approver = user(json!({ "IsApprover": true }));
    let result = AuthorizationService.require_manager(&approver);

    assert!(matches!(
        result,
        Err(AppError::Forbidden(message)) if message == "Manager access required."
    ));
}

#[test]
fn plain_user_is_denied_approver_access() {
    let plain = user(json!({}));
    let result = AuthorizationService.require_approver(&plain);

    assert!(matches!(
        result,
        Err(AppError::Forbidden(message)) if message == "Approver access required."
    ));
}
