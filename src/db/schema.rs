//! SQL DDL for initializing the database schema.

/// SQLite schema: a single `persons` table keyed by a storage-assigned id.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS persons (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL,
    age INTEGER NULL,
    address TEXT NULL,
    work TEXT NULL
);
"#;
