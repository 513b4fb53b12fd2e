use sqlx::FromRow;

/// One row of the `persons` table.
///
/// `id` is assigned by storage and always present on a persisted row;
/// attribute columns are nullable.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub address: Option<String>,
    pub work: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonCreate {
    pub name: String,
    pub age: Option<i64>,
    pub address: Option<String>,
    pub work: Option<String>,
}
