use serde::{Deserialize, Serialize};

/// Shape returned by `GET /persons/{id}` and each item of `GET /persons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub work: String,
}

/// Shape returned by `PATCH /persons/{id}`.
///
/// Attribute columns may be NULL in storage, so they serialize as `null`
/// instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedPersonResponse {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub address: Option<String>,
    pub work: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_response_field_order() {
        let resp = PersonResponse {
            id: 1,
            name: "test".to_string(),
            age: 2,
            address: "testaddress".to_string(),
            work: "testwork".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"id":1,"name":"test","age":2,"address":"testaddress","work":"testwork"}"#
        );
    }

    #[test]
    fn updated_response_renders_null_columns() {
        let resp = UpdatedPersonResponse {
            id: 3,
            name: "n".to_string(),
            age: None,
            address: Some("a".to_string()),
            work: None,
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"id":3,"name":"n","age":null,"address":"a","work":null}"#
        );
    }
}
