//! JSON file-based user repository
//!
//! Stores every user as one pretty-printed JSON array in a single file.
//! The file is read in full on every load and replaced in full on every save.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use user_manager_core::error::{CoreError, CoreResult};
use user_manager_core::traits::UserRepository;
use user_manager_core::types::User;

const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// User repository backed by a single JSON file.
///
/// A missing file reads as an empty store; the first save creates it along
/// with any missing parent directories.
#[derive(Debug, Clone)]
pub struct JsonFileUserRepository {
    path: PathBuf,
}

impl JsonFileUserRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        log::debug!("User store path: {}", path.display());
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> CoreResult<()> {
        let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };
        fs::create_dir_all(dir).await.map_err(|e| {
            CoreError::StorageWrite(format!(
                "Failed to create data directory {}: {e}",
                dir.display()
            ))
        })
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn load_all(&self) -> CoreResult<Vec<User>> {
        let exists = fs::try_exists(&self.path).await.map_err(|e| {
            CoreError::StorageRead(format!("Failed to stat {}: {e}", self.path.display()))
        })?;
        if !exists {
            log::debug!("User store file does not exist: {}", self.path.display());
            return Ok(Vec::new());
        }

        let metadata = fs::metadata(&self.path).await.map_err(|e| {
            CoreError::StorageRead(format!("Failed to read store file metadata: {e}"))
        })?;
        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(CoreError::StorageRead(format!(
                "Store file too large: {} bytes (max: {MAX_STORE_FILE_SIZE} bytes)",
                metadata.len()
            )));
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::StorageRead(format!("Failed to read store file: {e}")))?;

        serde_json::from_str(&content)
            .map_err(|e| CoreError::StorageRead(format!("Invalid users file format: {e}")))
    }

    async fn save_all(&self, users: &[User]) -> CoreResult<()> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(users)
            .map_err(|e| CoreError::StorageWrite(format!("Failed to serialize users: {e}")))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| CoreError::StorageWrite(format!("Failed to write store file: {e}")))?;

        log::debug!("Saved {} users to {}", users.len(), self.path.display());
        Ok(())
    }
}
