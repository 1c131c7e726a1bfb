//! userapi-server: HTTP CRUD service over a SQLite `users` table
//!
//! Layers, leaf-first:
//! - `models`: request bodies, validation, partial-update assembly
//! - `db`: pool, schema and the users repository
//! - `http`: handlers, error mapping, server bootstrap

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{DatabaseConfig, ServerConfig};
pub use http::{build_router, run_server, serve, ApiError, AppState, ServerError};
