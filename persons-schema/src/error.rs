//! Error envelope shared by every person route.

use serde::{Deserialize, Serialize};

/// `{ "errors": "<short machine-oriented message>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: message.into(),
        }
    }
}
