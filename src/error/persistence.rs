use std::time::Duration;
use thiserror::Error as ThisError;

/// Failure reported by a `PersonStore` implementation.
///
/// A store never picks an HTTP status; the server layer maps this to a 500.
#[derive(Debug, ThisError)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{op} did not finish within {after:?}")]
    Timeout { op: &'static str, after: Duration },
}
