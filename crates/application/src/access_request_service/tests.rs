use std::sync::Arc;

use serde_json::json;

use jitaccess_core::AppError;
use jitaccess_domain::AccessRequestInput;

use crate::gateway_ports::{FetchMode, SqlParam};
use crate::procedures;
use crate::test_support::{FakeGateway, user};

use super::AccessRequestService;

fn service(gateway: &Arc<FakeGateway>) -> AccessRequestService {
    AccessRequestService::new(gateway.clone())
}

#[tokio::test]
async fn submit_request_binds_csv_role_ids() {
    let gateway = Arc::new(FakeGateway::default());
    let input = AccessRequestInput::new(vec![3, 7], 2880, "audit".to_owned(), None);
    let Ok(input) = input else {
        panic!("input should validate");
    };

    let result = service(&gateway)
        .submit_request(&user(json!({})), input)
        .await;
    assert!(result.is_ok());

    let (call, fetch) = gateway.only_call().await;
    assert_eq!(call.name().as_str(), procedures::REQUEST_CREATE);
    assert_eq!(fetch, FetchMode::None);
    assert_eq!(
        call.parameter_names().collect::<Vec<_>>(),
        vec![
            "UserId",
            "RoleIds",
            "RequestedDurationMinutes",
            "Justification",
            "TicketRef"
        ]
    );
    assert_eq!(
        call.parameter("RoleIds"),
        Some(&SqlParam::Text("3,7".to_owned()))
    );
    assert_eq!(
        call.parameter("RequestedDurationMinutes"),
        Some(&SqlParam::Int(2880))
    );
    assert_eq!(call.parameter("TicketRef"), Some(&SqlParam::Null));
}

#[tokio::test]
async fn cancel_passes_the_owner() {
    let gateway = Arc::new(FakeGateway::default());

    let result = service(&gateway)
        .cancel_request(&user(json!({})), 42)
        .await;
    assert!(result.is_ok());

    let (call, _) = gateway.only_call().await;
    assert_eq!(call.name().as_str(), procedures::REQUEST_CANCEL);
    assert_eq!(call.parameter("RequestId"), Some(&SqlParam::Int(42)));
    assert_eq!(call.parameter("UserId"), Some(&SqlParam::Text("7".to_owned())));
}

#[tokio::test]
async fn user_listings_return_procedure_rows() {
    let gateway = Arc::new(FakeGateway::default().with_rows(
        procedures::GRANT_LIST_ACTIVE_FOR_USER,
        vec![json!({ "GrantId": 1, "RoleName": "Finance Readers" })],
    ));

    let grants = service(&gateway)
        .list_active_grants(&user(json!({})))
        .await;

    let Ok(grants) = grants else {
        panic!("grants should load");
    };
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].get("RoleName"), Some(&json!("Finance Readers")));
}

#[tokio::test]
async fn blank_deny_reason_fails_before_any_procedure_call() {
    let gateway = Arc::new(FakeGateway::default());
    let approver = user(json!({ "IsApprover": true }));

    let result = service(&gateway)
        .deny_request(&approver, 42, Some("   "))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(gateway.calls.lock().await.is_empty());
}

#[tokio::test]
async fn deny_requires_approver_before_validation() {
    let gateway = Arc::new(FakeGateway::default());

    let result = service(&gateway)
        .deny_request(&user(json!({})), 42, None)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(gateway.calls.lock().await.is_empty());
}

#[tokio::test]
async fn deny_trims_the_reason() {
    let gateway = Arc::new(FakeGateway::default());
    let approver = user(json!({ "IsDataSteward": true }));

    let result = service(&gateway)
        .deny_request(&approver, 42, Some("  not justified "))
        .await;
    assert!(result.is_ok());

    let (call, _) = gateway.only_call().await;
    assert_eq!(call.name().as_str(), procedures::REQUEST_DENY);
    assert_eq!(
        call.parameter("DecisionComment"),
        Some(&SqlParam::Text("not justified".to_owned()))
    );
}

#[tokio::test]
async fn approve_without_comment_sends_empty_string() {
    let gateway = Arc::new(FakeGateway::default());
    let approver = user(json!({ "IsApprover": true }));

    let result = service(&gateway)
        .approve_request(&approver, 42, None)
        .await;
    assert!(result.is_ok());

    let (call, _) = gateway.only_call().await;
    assert_eq!(call.parameter("ApproverUserId"), Some(&SqlParam::Text("7".to_owned())));
    assert_eq!(call.parameter("DecisionComment"), Some(&SqlParam::Text(String::new())));
}

#[tokio::test]
async fn approve_surfaces_procedure_errors_verbatim() {
    let gateway = Arc::new(
        FakeGateway::default().failing(procedures::REQUEST_APPROVE, "Request is not pending."),
    );
    let approver = user(json!({ "IsApprover": true }));

    let result = service(&gateway)
        .approve_request(&approver, 42, Some("ok".to_owned()))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Database(message)) if message == "Request is not pending."
    ));
}

#[tokio::test]
async fn plain_user_cannot_list_pending() {
    let gateway = Arc::new(FakeGateway::default());

    let result = service(&gateway).list_pending(&user(json!({}))).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(gateway.calls.lock().await.is_empty());
}

#[tokio::test]
async fn request_detail_attaches_roles() {
    let gateway = Arc::new(
        FakeGateway::default()
            .with_query_rows(vec![json!({ "RequestId": 42, "Status": "Pending" })])
            .with_rows(
                procedures::REQUEST_GET_ROLES,
                vec![json!({ "RoleId": 3 }), json!({ "RoleId": 7 })],
            ),
    );
    let approver = user(json!({ "IsApprover": true }));

    let detail = service(&gateway).request_detail(&approver, 42).await;

    let Ok(detail) = detail else {
        panic!("detail should load");
    };
    assert_eq!(detail.get("Status"), Some(&json!("Pending")));
    assert_eq!(
        detail.get("Roles"),
        Some(&json!([{ "RoleId": 3 }, { "RoleId": 7 }]))
    );
    assert_eq!(
        gateway.queries.lock().await[0].1,
        vec![SqlParam::Int(42)]
    );
}

#[tokio::test]
async fn missing_request_detail_is_not_found() {
    let gateway = Arc::new(FakeGateway::default());
    let approver = user(json!({ "IsAdmin": true }));

    let result = service(&gateway).request_detail(&approver, 404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(gateway.procedure_names().await, Vec::<String>::new());
}
