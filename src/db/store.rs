//! Person persistence: the `PersonStore` seam and its SQLite implementation.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::db::models::{Person, PersonCreate};
use crate::db::patch::PersonPatch;
use crate::error::PersistenceError;

/// Deadline applied to each store call unless configured otherwise.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const PERSON_COLUMNS: &str = "id, name, age, address, work";

/// Storage operations the HTTP layer depends on.
///
/// Absence is reported through the return value (`Ok(None)`, `Ok(false)`),
/// not through `PersistenceError`. `update` is the exception: a missing row
/// is indistinguishable from any other failure.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Insert a row and return the storage-assigned id.
    async fn create(&self, person: PersonCreate) -> Result<i64, PersistenceError>;

    /// Write only the supplied columns and return the row as stored afterwards.
    async fn update(&self, id: i64, patch: PersonPatch) -> Result<Person, PersistenceError>;

    /// `true` iff exactly one row was removed.
    async fn delete(&self, id: i64) -> Result<bool, PersistenceError>;

    async fn get(&self, id: i64) -> Result<Option<Person>, PersistenceError>;

    async fn list(&self) -> Result<Vec<Person>, PersistenceError>;
}

#[derive(Clone)]
pub struct SqlitePersonStore {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqlitePersonStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Current row, with a missing row reported as an error like the UPDATE path does.
    async fn current(&self, id: i64) -> Result<Person, PersistenceError> {
        self.get(id)
            .await?
            .ok_or(PersistenceError::Database(sqlx::Error::RowNotFound))
    }
}

#[async_trait]
impl PersonStore for SqlitePersonStore {
    async fn create(&self, person: PersonCreate) -> Result<i64, PersistenceError> {
        let query = sqlx::query_scalar::<_, i64>(
            r#"
        INSERT INTO persons (name, age, address, work)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(person.name)
        .bind(person.age)
        .bind(person.address)
        .bind(person.work);

        let id = with_deadline("create person", self.timeout, query.fetch_one(&self.pool)).await?;
        debug!(id, "person row inserted");
        Ok(id)
    }

    async fn update(&self, id: i64, patch: PersonPatch) -> Result<Person, PersistenceError> {
        if patch.is_empty() {
            debug!(id, "empty person patch; nothing written");
            return self.current(id).await;
        }

        let name_set = patch.name.is_some();
        let age_set = patch.age.is_some();
        let address_set = patch.address.is_some();
        let work_set = patch.work.is_some();

        let mut builder = update_statement(id, patch);
        let query = builder.build_query_as::<Person>();
        let person =
            with_deadline("update person", self.timeout, query.fetch_one(&self.pool)).await?;

        debug!(
            id,
            name_set,
            age_set,
            address_set,
            work_set,
            "person patch applied"
        );
        Ok(person)
    }

    async fn delete(&self, id: i64) -> Result<bool, PersistenceError> {
        let query = sqlx::query("DELETE FROM persons WHERE id = ?").bind(id);
        let res = with_deadline("delete person", self.timeout, query.execute(&self.pool)).await?;

        let affected = res.rows_affected();
        debug!(id, affected, "person delete executed");
        Ok(affected == 1)
    }

    async fn get(&self, id: i64) -> Result<Option<Person>, PersistenceError> {
        let query = sqlx::query_as::<_, Person>(
            r#"
        SELECT id, name, age, address, work
        FROM persons
        WHERE id = ?
        "#,
        )
        .bind(id);

        with_deadline("get person", self.timeout, query.fetch_optional(&self.pool)).await
    }

    async fn list(&self) -> Result<Vec<Person>, PersistenceError> {
        let query = sqlx::query_as::<_, Person>(
            r#"
        SELECT id, name, age, address, work
        FROM persons
        ORDER BY id
        "#,
        );

        with_deadline("list persons", self.timeout, query.fetch_all(&self.pool)).await
    }
}

/// `UPDATE persons SET <supplied columns> WHERE id = ? RETURNING ...`
///
/// Columns absent from `patch` are left out of the SET list entirely.
fn update_statement(id: i64, patch: PersonPatch) -> QueryBuilder<'static, Sqlite> {
    let PersonPatch {
        name,
        age,
        address,
        work,
    } = patch;

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE persons SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(name) = name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(age) = age {
            set.push("age = ").push_bind_unseparated(age);
        }
        if let Some(address) = address {
            set.push("address = ").push_bind_unseparated(address);
        }
        if let Some(work) = work {
            set.push("work = ").push_bind_unseparated(work);
        }
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(PERSON_COLUMNS);
    builder
}

async fn with_deadline<T, F>(
    op: &'static str,
    after: Duration,
    fut: F,
) -> Result<T, PersistenceError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(res) => Ok(res?),
        Err(_) => Err(PersistenceError::Timeout { op, after }),
    }
}
