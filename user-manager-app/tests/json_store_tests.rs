#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `JsonFileUserRepository` and the user service
//! running on top of a real backing file.

use std::path::PathBuf;
use std::sync::Arc;

use user_manager_app::adapters::JsonFileUserRepository;
use user_manager_core::error::CoreError;
use user_manager_core::services::UserService;
use user_manager_core::traits::UserRepository;
use user_manager_core::types::{CreateUserRequest, UpdateUserRequest, User};

// ===== Helpers =====

fn create_test_store() -> (JsonFileUserRepository, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("users.json");
    (JsonFileUserRepository::new(path), tmp)
}

fn create_test_service() -> (UserService, PathBuf, tempfile::TempDir) {
    let (store, tmp) = create_test_store();
    let path = store.path().to_path_buf();
    (UserService::new(Arc::new(store)), path, tmp)
}

fn make_user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        address: format!("{id} Main St"),
        phone: format!("555-01{id:02}"),
    }
}

fn ada() -> CreateUserRequest {
    CreateUserRequest {
        name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
        address: "1 Main St".to_string(),
        phone: "555-0100".to_string(),
    }
}

// ===== Repository Tests =====

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let (store, _tmp) = create_test_store();
    let users = store.load_all().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn save_then_load_preserves_records_and_order() {
    let (store, _tmp) = create_test_store();
    let users = vec![
        make_user(3, "Carol"),
        make_user(1, "Alice"),
        make_user(2, "Bob"),
    ];

    store.save_all(&users).await.unwrap();
    let loaded = store.load_all().await.unwrap();

    assert_eq!(loaded, users);
}

#[tokio::test]
async fn save_creates_missing_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("data").join("users.json");
    let store = JsonFileUserRepository::new(&path);

    store.save_all(&[make_user(1, "Alice")]).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn file_is_a_pretty_printed_json_array() {
    let (store, _tmp) = create_test_store();
    store.save_all(&[make_user(1, "Alice")]).await.unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("[\n  {"));

    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["id"], 1);
    assert_eq!(parsed[0]["email"], "alice@example.com");
}

#[tokio::test]
async fn invalid_json_is_a_read_error() {
    let (store, _tmp) = create_test_store();
    std::fs::write(store.path(), "{ not json").unwrap();

    let err = store.load_all().await.unwrap_err();

    assert!(matches!(err, CoreError::StorageRead(_)));
}

#[tokio::test]
async fn record_missing_a_field_is_a_read_error() {
    let (store, _tmp) = create_test_store();
    std::fs::write(store.path(), r#"[{"id": 1, "name": "Alice"}]"#).unwrap();

    let err = store.load_all().await.unwrap_err();

    assert!(matches!(err, CoreError::StorageRead(_)));
}

#[tokio::test]
async fn write_into_a_directory_path_is_a_write_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileUserRepository::new(tmp.path());

    let err = store.save_all(&[make_user(1, "Alice")]).await.unwrap_err();

    assert!(matches!(err, CoreError::StorageWrite(_)));
}

// ===== Service over a real file =====

#[tokio::test]
async fn create_create_delete_scenario() {
    let (service, _path, _tmp) = create_test_service();

    let first = service.create_user(ada()).await.unwrap();
    assert_eq!(
        first,
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
        }
    );

    let second = service
        .create_user(CreateUserRequest {
            name: "Grace".to_string(),
            email: "grace@x.com".to_string(),
            ..ada()
        })
        .await
        .unwrap();
    assert_eq!(second.id, 2);

    assert!(service.delete_user(1).await.unwrap());
    assert_eq!(service.get_user(1).await.unwrap(), None);
    assert_eq!(service.get_user(2).await.unwrap(), Some(second));
}

#[tokio::test]
async fn invalid_email_leaves_file_unchanged() {
    let (service, path, _tmp) = create_test_service();
    service.create_user(ada()).await.unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = service
        .create_user(CreateUserRequest {
            email: "ada-at-x".to_string(),
            ..ada()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn update_persists_merged_record() {
    let (service, path, _tmp) = create_test_service();
    let created = service.create_user(ada()).await.unwrap();

    service
        .update_user(
            created.id,
            UpdateUserRequest {
                address: Some("42 Analytical Way".to_string()),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    // Reload through a fresh repository to bypass any in-process state.
    let reloaded = JsonFileUserRepository::new(&path).load_all().await.unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].address, "42 Analytical Way");
    assert_eq!(reloaded[0].name, "Ada");
}

#[tokio::test]
async fn delete_of_unknown_id_keeps_count() {
    let (service, _path, _tmp) = create_test_service();
    service.create_user(ada()).await.unwrap();

    assert!(!service.delete_user(7).await.unwrap());
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_stored_email_fails_list() {
    let (store, _tmp) = create_test_store();
    let mut bad = make_user(1, "Alice");
    bad.email = "alice".to_string();
    store.save_all(&[bad]).await.unwrap();
    let service = UserService::new(Arc::new(store));

    let err = service.list_users().await.unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
}
