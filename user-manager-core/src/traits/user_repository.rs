//! User persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::User;

/// User record store Trait
///
/// The store is a flat list rewritten wholesale on every mutation, so the
/// trait only needs to load and replace the full collection.
///
/// Platform implementation:
/// - MCP server: `JsonFileUserRepository` (single JSON array file)
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load every stored user, in storage order
    ///
    /// Records are returned as parsed; field validation is the caller's job.
    async fn load_all(&self) -> CoreResult<Vec<User>>;

    /// Replace the stored collection
    ///
    /// # Arguments
    /// * `users` - The full list to persist, in order
    async fn save_all(&self, users: &[User]) -> CoreResult<()>;
}
