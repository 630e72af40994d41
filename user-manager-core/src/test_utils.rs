//! Test helper module
//!
//! Provides an in-memory repository and convenient factories.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::UserService;
use crate::traits::UserRepository;
use crate::types::User;

// ===== MockUserRepository =====

pub struct MockUserRepository {
    users: RwLock<Vec<User>>,
    /// Number of successful `save_all` calls
    saves: RwLock<usize>,
    /// If Some, `load_all` returns this error
    load_error: RwLock<Option<String>>,
    /// If Some, `save_all` returns this error
    save_error: RwLock<Option<String>>,
}

impl MockUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            saves: RwLock::new(0),
            load_error: RwLock::new(None),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_load_error(&self, err: Option<String>) {
        *self.load_error.write().await = err;
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn snapshot(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn load_all(&self) -> CoreResult<Vec<User>> {
        if let Some(ref msg) = *self.load_error.read().await {
            return Err(CoreError::StorageRead(msg.clone()));
        }
        Ok(self.users.read().await.clone())
    }

    async fn save_all(&self, users: &[User]) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageWrite(msg.clone()));
        }
        *self.users.write().await = users.to_vec();
        *self.saves.write().await += 1;
        Ok(())
    }
}

// ===== Factories =====

pub fn test_user(id: u64) -> User {
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        address: format!("{id} Test Street"),
        phone: format!("555-01{id:02}"),
    }
}

pub fn create_test_service(users: Vec<User>) -> (UserService, Arc<MockUserRepository>) {
    let repo = Arc::new(MockUserRepository::new(users));
    let service = UserService::new(Arc::clone(&repo) as Arc<dyn UserRepository>);
    (service, repo)
}
