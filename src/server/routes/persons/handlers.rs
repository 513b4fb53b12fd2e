use super::extract::{PersonId, PersonPayload};
use crate::db::Person;
use crate::error::PersonsError;
use crate::server::API_PREFIX;
use crate::server::router::PersonsState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use persons_schema::{PersonResponse, UpdatedPersonResponse};
use tracing::debug;

/// POST /api/v1/persons
///
/// 201 with a `Location` header pointing at the new person and no body.
pub(super) async fn create_person(
    State(state): State<PersonsState>,
    payload: PersonPayload,
) -> Result<Response, PersonsError> {
    let id = state
        .store
        .create(payload.into_create())
        .await
        .map_err(PersonsError::persistence("creating person error"))?;

    debug!(id, "[Persons] Created person");
    let location = format!("{API_PREFIX}/persons/{id}");
    Ok((StatusCode::CREATED, [(LOCATION, location)]).into_response())
}

/// PATCH /api/v1/persons/{id}
///
/// `name` is mandatory even here; the other fields are merged into the stored row.
/// A missing row is reported by the store as a plain failure, so this never yields 404.
pub(super) async fn update_person(
    PersonId(id): PersonId,
    State(state): State<PersonsState>,
    payload: PersonPayload,
) -> Result<Json<UpdatedPersonResponse>, PersonsError> {
    let person = state
        .store
        .update(id, payload.into_patch())
        .await
        .map_err(PersonsError::persistence("updating person error"))?;

    Ok(Json(UpdatedPersonResponse::from(person)))
}

/// DELETE /api/v1/persons/{id}
pub(super) async fn delete_person(
    PersonId(id): PersonId,
    State(state): State<PersonsState>,
) -> Result<StatusCode, PersonsError> {
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(PersonsError::persistence("deleting person error"))?;

    if !deleted {
        debug!(id, "[Persons] Nothing to delete");
        return Err(PersonsError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/persons/{id}
pub(super) async fn get_person(
    PersonId(id): PersonId,
    State(state): State<PersonsState>,
) -> Result<Json<PersonResponse>, PersonsError> {
    const CONTEXT: &str = "getting person error";

    let Some(person) = state
        .store
        .get(id)
        .await
        .map_err(PersonsError::persistence(CONTEXT))?
    else {
        return Err(PersonsError::NotFound);
    };

    Ok(Json(concrete(person, CONTEXT)?))
}

/// GET /api/v1/persons
pub(super) async fn list_persons(
    State(state): State<PersonsState>,
) -> Result<Json<Vec<PersonResponse>>, PersonsError> {
    const CONTEXT: &str = "getting persons error";

    let persons = state
        .store
        .list()
        .await
        .map_err(PersonsError::persistence(CONTEXT))?;

    let body = persons
        .into_iter()
        .map(|person| concrete(person, CONTEXT))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(body))
}

/// Read routes promise every column; a NULL column is a data fault, not a 200.
fn concrete(person: Person, context: &'static str) -> Result<PersonResponse, PersonsError> {
    let Person {
        id,
        name,
        age,
        address,
        work,
    } = person;

    match (age, address, work) {
        (Some(age), Some(address), Some(work)) => Ok(PersonResponse {
            id,
            name,
            age,
            address,
            work,
        }),
        _ => Err(PersonsError::IncompleteRecord { context, id }),
    }
}

impl From<Person> for UpdatedPersonResponse {
    fn from(person: Person) -> Self {
        let Person {
            id,
            name,
            age,
            address,
            work,
        } = person;
        Self {
            id,
            name,
            age,
            address,
            work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(age: Option<i64>) -> Person {
        Person {
            id: 4,
            name: "n".to_string(),
            age,
            address: Some("a".to_string()),
            work: Some("w".to_string()),
        }
    }

    #[test]
    fn concrete_requires_every_column() {
        let resp = concrete(person(Some(9)), "getting person error").unwrap();
        assert_eq!(resp.age, 9);

        let err = concrete(person(None), "getting person error").unwrap_err();
        assert!(matches!(
            err,
            PersonsError::IncompleteRecord {
                context: "getting person error",
                id: 4
            }
        ));
    }
}
