pub mod error;
pub mod person;

pub use error::ErrorBody;
pub use person::{PersonRequest, PersonResponse, UpdatedPersonResponse};
