//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and request payloads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the user and event stores over a shared pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{LogEvent, LogEventInput, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{connect, init_schema, EventStore, SqlitePool, UserStore};
