mod persistence;
mod persons;

pub use persistence::PersistenceError;
pub use persons::PersonsError;
