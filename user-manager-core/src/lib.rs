//! User Manager Core Library
//!
//! Provides the business logic behind the user-management MCP server:
//! - the `User` record and its create/update request types
//! - field-level validation (the schema gate shared by the store and the MCP layer)
//! - `UserService`, the record store contract (list, get, create, update, delete)
//!
//! Persistence is abstracted through the [`UserRepository`] trait so the
//! backing file can be swapped for an in-memory store in tests.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::UserService;
pub use traits::UserRepository;
pub use validation::{FieldError, Validate, ValidationError};
