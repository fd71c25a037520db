//! Integration tests for the wallet, dashboard, notification, support and
//! admin pages against the mock backend

mod helpers;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use helpers::*;
use paytask::catalog::{DisputeOutcome, NewTicket, TicketCategory, TicketPriority};
use paytask::handlers::{admin, dashboard, notifications, profile, support, wallet};
use paytask::models::TransactionKind;
use paytask::{MockCatalog, PayTaskError};

#[tokio::test]
async fn test_wallet_overview() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("user-1", "client").await;
    mock.mock_ok("GET", "wallets/me", create_test_wallet(40.0, 10.5)).await;
    Mock::given(method("GET"))
        .and(path("/api/wallets/transactions"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .and(query_param("type", "deposit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(create_test_page(
            vec![
                create_test_transaction("tx-1", "deposit", 50.0, "completed"),
                create_test_transaction("tx-2", "deposit", 5.0, "pending"),
            ],
            1,
            20,
        ))))
        .mount(&mock.server)
        .await;

    let text = wallet::handle_overview(&services, 1, 20, Some(TransactionKind::Deposit)).await.unwrap();
    assert!(text.contains("Available:        $40.00"));
    assert!(text.contains("In escrow:        $10.50"));
    assert!(text.contains("Total:            $50.50"));
    assert!(text.contains("Net flow:         $50.00"));
    assert!(text.contains("Pending:          1"));
}

#[tokio::test]
async fn test_wallet_requires_login() {
    let mock = PayTaskMockServer::new().await;
    let err = wallet::handle_overview(&mock.services(), 1, 20, None).await.unwrap_err();
    assert_matches!(err, PayTaskError::Unauthorized(_));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_deposit_and_withdraw() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("user-1", "worker").await;
    mock.mock_ok("POST", "wallets/deposit", create_test_transaction("tx-9", "deposit", 25.0, "pending")).await;
    mock.mock_ok("POST", "wallets/withdraw", create_test_transaction("tx-10", "withdrawal", -15.0, "pending"))
        .await;

    let text = wallet::handle_deposit(&services, 25.0).await.unwrap();
    assert_eq!(text, "Deposit of $25.00 is pending (transaction tx-9).");
    let body: serde_json::Value = mock.requests_to("wallets/deposit").await[0].body_json().unwrap();
    assert_eq!(body, json!({ "amount": 25.0 }));

    let text = wallet::handle_withdraw(&services, 15.0, "paypal:amara@example.com").await.unwrap();
    assert_eq!(
        text,
        "Withdrawal of $15.00 to paypal:amara@example.com is pending (transaction tx-10)."
    );
}

#[tokio::test]
async fn test_transfers_below_minimum_are_not_sent() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("user-1", "worker").await;

    let err = wallet::handle_deposit(&services, 0.5).await.unwrap_err();
    assert_matches!(err, PayTaskError::InvalidInput(_));
    let err = wallet::handle_withdraw(&services, 20.0, "  ").await.unwrap_err();
    assert_matches!(err, PayTaskError::InvalidInput(_));

    assert!(mock.requests_to("wallets/deposit").await.is_empty());
    assert!(mock.requests_to("wallets/withdraw").await.is_empty());
}

#[tokio::test]
async fn test_worker_dashboard_combines_sources() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("worker-1", "worker").await;
    mock.mock_ok(
        "GET",
        "stats/worker",
        json!({ "totalEarnings": 120.75, "pendingEarnings": 3.5, "tasksCompleted": 48 }),
    )
    .await;
    mock.mock_ok(
        "GET",
        "assignments/my",
        json!([
            create_test_assignment("asg-1", "task-1", "in_progress"),
            create_test_assignment("asg-2", "task-2", "submitted"),
        ]),
    )
    .await;
    mock.mock_ok("GET", "submissions/my", json!([create_test_submission("sub-1", "asg-2", "pending")])).await;

    let text = dashboard::worker_dashboard(&services).await.unwrap();
    assert!(text.contains("Total earnings:   $120.75"));
    assert!(text.contains("Tasks completed:  48"));
    assert!(text.contains("Rating:           no ratings yet"));
    assert!(text.contains("In progress:      1"));
    assert!(text.contains("Awaiting review:  1"));
    assert!(text.contains("[asg-1] Label street signs"));
}

#[tokio::test]
async fn test_dashboard_propagates_backend_failure() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("worker-1", "worker").await;
    mock.mock_error("GET", "stats/worker", 500, "INTERNAL", "Stats are unavailable").await;
    mock.mock_ok("GET", "assignments/my", json!([])).await;
    mock.mock_ok("GET", "submissions/my", json!([])).await;

    let err = dashboard::worker_dashboard(&services).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_mark_notifications_read() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("user-1", "worker").await;
    mock.mock_ok(
        "POST",
        "notifications/n-1/read",
        json!({
            "id": "n-1",
            "userId": "user-1",
            "type": "submission_approved",
            "title": "Submission approved",
            "message": "You earned $0.50",
            "read": true,
            "createdAt": chrono::Utc::now().to_rfc3339(),
        }),
    )
    .await;
    mock.mock_ok("POST", "notifications/read-all", json!({})).await;

    let text = notifications::handle_mark_read(&services, Some("n-1")).await.unwrap();
    assert_eq!(text, "Marked \"Submission approved\" as read.");

    let text = notifications::handle_mark_read(&services, None).await.unwrap();
    assert_eq!(text, "All notifications marked as read.");
}

#[tokio::test]
async fn test_support_ticket_uses_signed_in_name() {
    let mock = PayTaskMockServer::new().await;
    mock.mock_me(create_named_user("user-1", "Amara Okafor", "worker")).await;
    let tokens = paytask::TokenStorage::in_memory();
    tokens.save(test_token()).await.unwrap();
    let services = mock.services_with(tokens);
    let catalog = MockCatalog::seeded();

    let form = NewTicket {
        subject: "Payout missing".to_string(),
        category: TicketCategory::Payment,
        priority: TicketPriority::High,
        message: "My withdrawal from Monday has not arrived yet.".to_string(),
    };
    let text = support::handle_submit(&services, &catalog.support, form).await.unwrap();
    assert!(text.contains("Amara Okafor"));
    assert!(text.contains("Thanks! Ticket TKT-"));
}

#[tokio::test]
async fn test_support_ticket_without_session() {
    let mock = PayTaskMockServer::new().await;
    let catalog = MockCatalog::seeded();

    let form = NewTicket {
        subject: "Question".to_string(),
        category: TicketCategory::Other,
        priority: TicketPriority::Low,
        message: "How long does a task review usually take?".to_string(),
    };
    let text = support::handle_submit(&mock.services(), &catalog.support, form).await.unwrap();
    assert!(text.contains("You"));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_admin_pages_require_admin() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("worker-1", "worker").await;
    let catalog = MockCatalog::seeded();

    let err = admin::handle_disputes(&services, &catalog.disputes, false).await.unwrap_err();
    assert_matches!(err, PayTaskError::Forbidden(ref message) if message == "This page is for admin accounts");
    assert!(mock.requests_to("stats/platform").await.is_empty());
}

#[tokio::test]
async fn test_admin_resolves_dispute_locally() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("admin-1", "admin").await;
    let catalog = MockCatalog::seeded();

    let text = admin::handle_resolve(
        &services,
        &catalog.disputes,
        "DSP-1001",
        DisputeOutcome::Split,
        "Audio cut off, both sides share the loss",
    )
    .await
    .unwrap();
    assert!(text.contains("worker receives $6.25, client receives $6.25"));
    assert!(text.ends_with("Note: Audio cut off, both sides share the loss"));

    let err = admin::handle_resolve(&services, &catalog.disputes, "DSP-0987", DisputeOutcome::Worker, "Reopening this one")
        .await
        .unwrap_err();
    assert_matches!(err, PayTaskError::InvalidInput(_));

    // Only the session lookup reached the backend
    assert_eq!(mock.requests().await.len(), 1);
}

#[tokio::test]
async fn test_settings_resubmits_edited_profile() {
    let mock = PayTaskMockServer::new().await;
    let services = mock.signed_in("user-1", "worker").await;
    let mut updated = create_named_user("user-1", "Amara O.", "worker");
    updated["bio"] = json!("Transcription and labeling");
    mock.mock_ok("PUT", "users/me", updated).await;

    let changes = paytask::models::UpdateUserRequest {
        name: Some("Amara O.".to_string()),
        bio: Some("Transcription and labeling".to_string()),
        ..Default::default()
    };
    let text = profile::handle_settings(&services, changes).await.unwrap();
    assert!(text.starts_with("Profile saved."));
    assert!(text.contains("Bio:              Transcription and labeling"));

    let body: serde_json::Value = mock.requests_to("users/me").await[0].body_json().unwrap();
    assert_eq!(body["name"], "Amara O.");
    assert_eq!(body["skills"], json!([]));
}

#[tokio::test]
async fn test_error_report_carries_command_context() {
    let mock = PayTaskMockServer::new().await;
    mock.mock_ok(
        "POST",
        "errorlogs",
        json!({
            "id": "log-1",
            "level": "error",
            "message": "Request timed out",
            "createdAt": chrono::Utc::now().to_rfc3339(),
        }),
    )
    .await;

    let services = mock.services();
    let log = services.error_logs.report_error(&PayTaskError::Timeout, "dashboard").await.unwrap();
    assert_eq!(log.id, "log-1");

    let body: serde_json::Value = mock.requests_to("errorlogs").await[0].body_json().unwrap();
    assert_eq!(body["level"], "error");
    assert_eq!(body["message"], "Request timed out");
    assert_eq!(body["context"]["command"], "dashboard");
}
