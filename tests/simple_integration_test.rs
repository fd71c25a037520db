//! Simple integration test to verify basic test infrastructure
//!
//! This test file verifies that the mock backend and test context work
//! before the heavier API tests rely on them.

mod helpers;

use helpers::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_simple_infrastructure_setup() {
    let ctx = SimpleTestContext::new().expect("Failed to create simple test context");

    assert!(ctx.temp_path().is_some());
    let temp_path = ctx.temp_path().unwrap();
    assert!(temp_path.exists());
}

#[tokio::test]
#[serial]
async fn test_mock_backend_basic() {
    let mock_server = PayTaskMockServer::new().await;

    assert!(mock_server.base_url.ends_with("/api"));
    let services = mock_server.services();
    assert_eq!(services.settings.api.base_url, mock_server.base_url);
    assert!(!services.session.is_authenticated().await.unwrap());
}

#[tokio::test]
#[serial]
async fn test_mock_response_config() {
    let config = MockResponseConfig::default();
    assert!(config.success);
    assert!(config.delay_ms.is_none());
    assert!(config.custom_response.is_none());

    let error_config = MockResponseConfig {
        success: false,
        delay_ms: Some(100),
        custom_response: None,
    };
    assert!(!error_config.success);
    assert_eq!(error_config.delay_ms, Some(100));
}

#[tokio::test]
#[serial]
async fn test_fixture_records_deserialize() {
    let user: paytask::models::UserProfile =
        serde_json::from_value(create_test_user("user-1", "worker")).expect("user fixture");
    assert_eq!(user.role, paytask::models::UserRole::Worker);

    let task: paytask::models::Task =
        serde_json::from_value(create_test_task("task-1", "Label street signs", 0.5, 20)).expect("task fixture");
    assert_eq!(task.remaining(), 20);

    let wallet: paytask::models::Wallet = serde_json::from_value(create_test_wallet(40.0, 10.0)).expect("wallet fixture");
    assert_eq!(wallet.total(), 50.0);
}

#[tokio::test]
#[serial]
async fn test_simple_config_variations() {
    let persisted = SimpleTestContext::new_with_config(SimpleTestConfig {
        persist_token: true,
        use_temp_files: true,
    })
    .expect("Failed to create context");
    assert!(persisted.token_storage().path().is_some());
    assert!(persisted.settings("http://localhost:5000/api").auth.persist_token);

    let memory_only = SimpleTestContext::new_with_config(SimpleTestConfig {
        persist_token: false,
        use_temp_files: false,
    })
    .expect("Failed to create context");
    assert!(memory_only.temp_dir.is_none());
    assert!(memory_only.token_storage().path().is_none());
}
