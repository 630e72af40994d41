use super::*;

use async_trait::async_trait;
use tokio::sync::RwLock;
use user_manager_core::error::CoreResult;
use user_manager_core::traits::UserRepository;
use user_manager_core::types::User;

/// Test-only in-memory user repository.
pub struct TestUserRepository {
    users: RwLock<Vec<User>>,
    fail_load: bool,
    fail_save: bool,
}

impl TestUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            fail_load: false,
            fail_save: false,
        }
    }

    /// Every load fails with a storage error that mentions a secret path.
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::new(Vec::new())
        }
    }

    /// Loads succeed but every save fails.
    pub fn failing_save(users: Vec<User>) -> Self {
        Self {
            fail_save: true,
            ..Self::new(users)
        }
    }

    pub async fn snapshot(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for TestUserRepository {
    async fn load_all(&self) -> CoreResult<Vec<User>> {
        if self.fail_load {
            return Err(CoreError::StorageRead(
                "mock read failure at /secret/users.json".to_string(),
            ));
        }
        Ok(self.users.read().await.clone())
    }

    async fn save_all(&self, users: &[User]) -> CoreResult<()> {
        if self.fail_save {
            return Err(CoreError::StorageWrite(
                "mock write failure at /secret/users.json".to_string(),
            ));
        }
        *self.users.write().await = users.to_vec();
        Ok(())
    }
}

pub(super) fn test_user(id: u64) -> User {
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        address: format!("{id} Main St"),
        phone: format!("555-01{id:02}"),
    }
}

pub(super) fn test_identity() -> ServerIdentity {
    ServerIdentity {
        name: "test-user-manager".to_string(),
        version: "9.9.9".to_string(),
    }
}

pub(super) fn build_server(repository: Arc<TestUserRepository>) -> UserManagerMcp {
    let user_service = Arc::new(UserService::new(repository));
    UserManagerMcp::new(user_service, test_identity())
}
