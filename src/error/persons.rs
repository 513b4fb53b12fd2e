use axum::{Json, http::StatusCode, response::IntoResponse};
use persons_schema::ErrorBody;
use thiserror::Error as ThisError;
use tracing::{error, warn};

use super::PersistenceError;

#[derive(Debug, ThisError)]
pub enum PersonsError {
    /// Client-caused: unreadable body, missing `name`, bad path id.
    #[error("{0}")]
    Validation(&'static str),

    #[error("person not found")]
    NotFound,

    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: PersistenceError,
    },

    /// A stored row lacks a column the response shape requires.
    #[error("{context}: person id={id} has NULL attribute columns")]
    IncompleteRecord { context: &'static str, id: i64 },
}

impl PersonsError {
    pub fn persistence(context: &'static str) -> impl FnOnce(PersistenceError) -> Self {
        move |source| PersonsError::Persistence { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PersonsError::Validation(_) => StatusCode::BAD_REQUEST,
            PersonsError::NotFound => StatusCode::NOT_FOUND,
            PersonsError::Persistence { .. } | PersonsError::IncompleteRecord { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `errors` field; never carries backend detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            PersonsError::Validation(message) => *message,
            PersonsError::NotFound => "person not found",
            PersonsError::Persistence { context, .. }
            | PersonsError::IncompleteRecord { context, .. } => *context,
        }
    }
}

impl IntoResponse for PersonsError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "person request failed");
        } else {
            warn!(status = %status, error = %self, "person request rejected");
        }
        (status, Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    async fn render(err: PersonsError) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn persistence_errors_hide_backend_detail() {
        let err = PersonsError::persistence("getting person error")(PersistenceError::Timeout {
            op: "get person",
            after: Duration::from_secs(5),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"errors":"getting person error"}"#);
    }

    #[tokio::test]
    async fn client_errors_map_to_4xx() {
        let (status, body) = render(PersonsError::Validation("wrong id")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"errors":"wrong id"}"#);

        let (status, body) = render(PersonsError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"errors":"person not found"}"#);
    }
}
