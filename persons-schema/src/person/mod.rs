mod request;
mod response;

pub use request::PersonRequest;
pub use response::{PersonResponse, UpdatedPersonResponse};
