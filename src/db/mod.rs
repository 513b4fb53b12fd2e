//! Database module: person rows, schema, and the store behind the HTTP layer.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `patch.rs`: partial update payload
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `pool.rs`: connection setup
//! - `store.rs`: `PersonStore` trait and the SQLite implementation

pub mod models;
pub mod patch;
pub mod pool;
pub mod schema;
pub mod store;

pub use models::{Person, PersonCreate};
pub use patch::PersonPatch;
pub use pool::connect;
pub use schema::SQLITE_INIT;
pub use store::{DEFAULT_QUERY_TIMEOUT, PersonStore, SqlitePersonStore};
