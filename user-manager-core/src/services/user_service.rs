//! User record store service
//!
//! Every operation reloads the full collection from the repository, and every
//! mutation writes the full collection back. There is no locking: two
//! concurrent mutations race and the last write wins.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::traits::UserRepository;
use crate::types::{CreateUserRequest, UpdateUserRequest, User, UserId};
use crate::validation::Validate;

/// User service
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a user service instance
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// List all users
    ///
    /// Every stored record is validated; one malformed record fails the whole read.
    pub async fn list_users(&self) -> CoreResult<Vec<User>> {
        log::debug!("Fetching all users");
        let users = self.repository.load_all().await?;
        for user in &users {
            if let Err(e) = user.validate() {
                log::error!("Stored user {} is malformed: {e}", user.id);
                return Err(e.into());
            }
        }
        log::info!("Retrieved {} users", users.len());
        Ok(users)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: UserId) -> CoreResult<Option<User>> {
        log::debug!("Fetching user with ID: {id}");
        let user = self.list_users().await?.into_iter().find(|u| u.id == id);
        match &user {
            Some(u) => log::info!("Retrieved user: {} (ID: {id})", u.name),
            None => log::warn!("User with ID {id} not found"),
        }
        Ok(user)
    }

    /// Create a user
    ///
    /// The new ID is `max(existing ids, 0) + 1`, recomputed from the current file.
    pub async fn create_user(&self, request: CreateUserRequest) -> CoreResult<User> {
        log::debug!("Creating new user: {request:?}");
        request.validate()?;

        let mut users = self.list_users().await?;
        let id = next_id(&users)?;
        let user = User::from_request(id, request);

        users.push(user.clone());
        self.repository.save_all(&users).await?;

        log::info!("Created new user: {} (ID: {id})", user.name);
        Ok(user)
    }

    /// Update a user
    ///
    /// Returns `None` without writing when no user has the given ID.
    pub async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> CoreResult<Option<User>> {
        log::debug!("Updating user with ID: {id}: {request:?}");

        let mut users = self.list_users().await?;
        let Some(pos) = users.iter().position(|u| u.id == id) else {
            log::warn!("User with ID {id} not found for update");
            return Ok(None);
        };

        request.validate()?;
        if request.is_empty() {
            log::debug!("Update for user {id} carries no fields");
        }

        users[pos].apply(request);
        let updated = users[pos].clone();
        self.repository.save_all(&users).await?;

        log::info!("Updated user: {} (ID: {id})", updated.name);
        Ok(Some(updated))
    }

    /// Delete a user
    ///
    /// Returns whether a record was removed. A miss leaves storage untouched.
    pub async fn delete_user(&self, id: UserId) -> CoreResult<bool> {
        log::debug!("Deleting user with ID: {id}");

        let mut users = self.list_users().await?;
        let Some(pos) = users.iter().position(|u| u.id == id) else {
            log::warn!("User with ID {id} not found for deletion");
            return Ok(false);
        };

        let deleted = users.remove(pos);
        self.repository.save_all(&users).await?;

        log::info!("Deleted user: {} (ID: {id})", deleted.name);
        Ok(true)
    }
}

/// Next free ID: one past the largest existing ID, or 1 for an empty store.
fn next_id(users: &[User]) -> CoreResult<UserId> {
    let max = users.iter().map(|u| u.id).max().unwrap_or(0);
    max.checked_add(1).ok_or_else(|| {
        log::error!("No user ID left after {max}");
        CoreError::StorageWrite("user id space exhausted".to_string())
    })
}
