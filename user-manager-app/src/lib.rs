//! Application bootstrap for User Manager.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection)
//! and the JSON file storage adapter used by the MCP server.

pub mod adapters;

use std::path::PathBuf;
use std::sync::Arc;

use user_manager_core::error::{CoreError, CoreResult};
use user_manager_core::services::UserService;
use user_manager_core::traits::UserRepository;
use user_manager_core::validation::ValidationError;

use crate::adapters::JsonFileUserRepository;

/// Application state.
///
/// Built once at startup via `AppStateBuilder` and handed to the frontend.
pub struct AppState {
    /// Storage adapter backing the user service
    pub user_repository: Arc<dyn UserRepository>,
    /// User record store service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Check that the store can be read and report its size.
    ///
    /// A failure is logged but does not stop startup: every request reloads
    /// the file, so a store fixed on disk is picked up without a restart.
    pub async fn run_startup(&self) -> Option<usize> {
        match self.user_service.list_users().await {
            Ok(users) => {
                log::info!("User store ready: {} users", users.len());
                Some(users.len())
            }
            Err(e) => {
                log::error!("User store is not readable: {e}");
                None
            }
        }
    }
}

/// Builder for constructing `AppState` with a storage adapter.
///
/// # Required adapters
/// - `user_repository`: how user records are stored
pub struct AppStateBuilder {
    user_repository: Option<Arc<dyn UserRepository>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_repository: None,
        }
    }

    #[must_use]
    pub fn user_repository(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repository = Some(repo);
        self
    }

    /// Use a `JsonFileUserRepository` at `path`.
    #[must_use]
    pub fn json_file(self, path: impl Into<PathBuf>) -> Self {
        self.user_repository(Arc::new(JsonFileUserRepository::new(path)))
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if the repository is missing.
    pub fn build(self) -> CoreResult<AppState> {
        let user_repository = self.user_repository.ok_or_else(|| {
            CoreError::Validation(ValidationError::single(
                "user_repository",
                "user_repository is required",
            ))
        })?;

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));

        Ok(AppState {
            user_repository,
            user_service,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
