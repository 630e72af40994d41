#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the `AppState` startup check.

use user_manager_app::AppStateBuilder;
use user_manager_core::error::CoreError;
use user_manager_core::traits::UserRepository;
use user_manager_core::types::CreateUserRequest;

#[test]
fn build_without_repository_fails() {
    let result = AppStateBuilder::new().build();
    let Err(CoreError::Validation(err)) = result else {
        panic!("expected a validation error");
    };
    assert!(err.has_field("user_repository"));
}

#[tokio::test]
async fn startup_reports_empty_store_for_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let state = AppStateBuilder::new()
        .json_file(tmp.path().join("users.json"))
        .build()
        .unwrap();

    assert_eq!(state.run_startup().await, Some(0));
}

#[tokio::test]
async fn startup_reports_unreadable_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("users.json");
    std::fs::write(&path, "garbage").unwrap();
    let state = AppStateBuilder::new().json_file(&path).build().unwrap();

    assert_eq!(state.run_startup().await, None);
}

#[tokio::test]
async fn service_and_repository_share_the_same_file() {
    let tmp = tempfile::tempdir().unwrap();
    let state = AppStateBuilder::new()
        .json_file(tmp.path().join("users.json"))
        .build()
        .unwrap();

    state
        .user_service
        .create_user(CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
        })
        .await
        .unwrap();

    let stored = state.user_repository.load_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(state.run_startup().await, Some(1));
}
