//! Type definitions

mod user;

pub use user::{CreateUserRequest, UpdateUserRequest, User, UserId};
