//! Database module: models, schema, and the storage context.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and their JSON shapes
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `PetStore` plus user/pet queries
//! - `logs.rs`: diet/weight/vaccine log queries and derived views
//! - `reminders.rs`: reminder queries and date-window views

pub mod logs;
pub mod models;
pub mod reminders;
pub mod schema;
pub mod sqlite;

pub use schema::SQLITE_INIT;
pub use sqlite::{PetStore, SqlitePool, connect};
