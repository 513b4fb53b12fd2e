use crate::db::{PersonCreate, PersonPatch};
use crate::error::PersonsError;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use persons_schema::PersonRequest;
use tracing::debug;

/// Path identifier of a person, parsed as a base-10 integer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PersonId(pub(crate) i64);

impl<S> FromRequestParts<S> for PersonId
where
    S: Send + Sync,
{
    type Rejection = PersonsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| PersonsError::Validation("wrong id"))?;

        raw.parse::<i64>().map(PersonId).map_err(|e| {
            debug!(id = %raw, error = %e, "[Persons] Rejected path id");
            PersonsError::Validation("wrong id")
        })
    }
}

/// Validated body of the create and update routes: `name` is present and non-null.
#[derive(Debug, Clone)]
pub(crate) struct PersonPayload {
    pub(crate) name: String,
    pub(crate) age: Option<Option<i64>>,
    pub(crate) address: Option<Option<String>>,
    pub(crate) work: Option<Option<String>>,
}

impl PersonPayload {
    /// `null` and a missing key both store NULL on insert.
    pub(crate) fn into_create(self) -> PersonCreate {
        PersonCreate {
            name: self.name,
            age: self.age.flatten(),
            address: self.address.flatten(),
            work: self.work.flatten(),
        }
    }

    /// Missing keys leave columns untouched; `null` clears them.
    pub(crate) fn into_patch(self) -> PersonPatch {
        PersonPatch {
            name: Some(self.name),
            age: self.age,
            address: self.address,
            work: self.work,
        }
    }
}

impl<S> FromRequest<S> for PersonPayload
where
    S: Send + Sync,
{
    type Rejection = PersonsError;

    /// The body is decoded as JSON whatever the `content-type` says.
    ///
    /// - unreadable body or invalid JSON => `unmarshalling error`
    /// - `name` missing or `null` => `validation error`
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "[Persons] Failed to read request body");
            PersonsError::Validation("unmarshalling error")
        })?;

        let request: PersonRequest = serde_json::from_slice(&body).map_err(|e| {
            debug!(error = %e, "[Persons] Failed to decode request body");
            PersonsError::Validation("unmarshalling error")
        })?;

        with_pretty_json_debug(&request, |pretty_body| {
            debug!(body = %pretty_body, "[Persons] Extracted request body");
        });

        let PersonRequest {
            name,
            age,
            address,
            work,
        } = request;

        let Some(name) = name.flatten() else {
            return Err(PersonsError::Validation("validation error"));
        };

        Ok(Self {
            name,
            age,
            address,
            work,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<PersonPayload, PersonsError> {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/persons")
            .body(Body::from(body))
            .unwrap();
        PersonPayload::from_request(req, &()).await
    }

    #[tokio::test]
    async fn body_without_content_type_is_accepted() {
        let payload = extract(r#"{"name":"test","age":1}"#).await.unwrap();
        assert_eq!(payload.name, "test");
        assert_eq!(payload.age, Some(Some(1)));
        assert_eq!(payload.work, None);
    }

    #[tokio::test]
    async fn rejects_undecodable_and_nameless_bodies() {
        for (body, message) in [
            ("", "unmarshalling error"),
            ("not-json", "unmarshalling error"),
            (r#"{"name":"a","age":"old"}"#, "unmarshalling error"),
            ("[]", "unmarshalling error"),
            (r#"["x"]"#, "unmarshalling error"),
            ("{}", "validation error"),
            (r#"{"name":null,"age":3}"#, "validation error"),
        ] {
            let err = extract(body).await.unwrap_err();
            assert!(
                matches!(err, PersonsError::Validation(m) if m == message),
                "body {body:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn create_collapses_null_and_patch_keeps_it() {
        let payload = PersonPayload {
            name: "n".to_string(),
            age: None,
            address: Some(None),
            work: Some(Some("w".to_string())),
        };

        let create = payload.clone().into_create();
        assert_eq!(create.address, None);
        assert_eq!(create.work.as_deref(), Some("w"));

        let patch = payload.into_patch();
        assert_eq!(patch.name.as_deref(), Some("n"));
        assert_eq!(patch.age, None);
        assert_eq!(patch.address, Some(None));
    }
}
