//! Books API - A small HTTP service for managing a book catalogue
//!
//! Provides CRUD over books, API-key authentication backed by a secret store,
//! and an archival routine that marks old books as archived.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod secrets;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_archival_task;
