//! Storage layer abstraction trait definition

mod user_repository;

pub use user_repository::UserRepository;
