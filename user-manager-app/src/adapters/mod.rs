//! Storage adapters for the user record store.

mod json_file_repository;

pub use json_file_repository::JsonFileUserRepository;
