//! Inbound payload for `POST /persons` and `PATCH /persons/{id}`.

use serde::de::{self, MapAccess, Visitor, value::MapAccessDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Body accepted by the create and update routes.
///
/// Each field keeps three states apart:
/// - `None`: key missing from the JSON object
/// - `Some(None)`: key present with `null`
/// - `Some(Some(v))`: key present with a value
///
/// Only a JSON object decodes; arrays are rejected even though they would
/// otherwise fill fields by position. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Option<i64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<Option<String>>,
}

#[derive(Deserialize)]
struct PersonRequestFields {
    #[serde(default, deserialize_with = "present")]
    name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    work: Option<Option<String>>,
}

impl<'de> Deserialize<'de> for PersonRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ObjectOnly)
    }
}

struct ObjectOnly;

impl<'de> Visitor<'de> for ObjectOnly {
    type Value = PersonRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let PersonRequestFields {
            name,
            age,
            address,
            work,
        } = PersonRequestFields::deserialize(MapAccessDeserializer::new(map))?;
        Ok(PersonRequest {
            name,
            age,
            address,
            work,
        })
    }
}

/// Only called when the key exists, so a `null` lands as `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_null_and_value_stay_distinct() {
        let req: PersonRequest =
            serde_json::from_str(r#"{"name":"ann","age":null,"work":""}"#).unwrap();

        assert_eq!(req.name, Some(Some("ann".to_string())));
        assert_eq!(req.age, Some(None));
        assert_eq!(req.address, None);
        assert_eq!(req.work, Some(Some(String::new())));
    }

    #[test]
    fn empty_object_decodes_to_all_absent() {
        let req: PersonRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, PersonRequest::default());
    }

    #[test]
    fn null_name_is_not_a_name() {
        let req: PersonRequest = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(req.name, Some(None));
    }

    #[test]
    fn wrong_types_fail_to_decode() {
        assert!(serde_json::from_str::<PersonRequest>(r#"{"name":"a","age":"1"}"#).is_err());
        assert!(serde_json::from_str::<PersonRequest>(r#"{"name":7}"#).is_err());
        assert!(serde_json::from_str::<PersonRequest>("null").is_err());
    }

    #[test]
    fn arrays_are_not_objects() {
        assert!(serde_json::from_str::<PersonRequest>("[]").is_err());
        assert!(serde_json::from_str::<PersonRequest>(r#"["x"]"#).is_err());
        assert!(
            serde_json::from_str::<PersonRequest>(r#"["bob",7,"addr","work"]"#).is_err()
        );
    }

    #[test]
    fn age_accepts_the_full_integer_range() {
        let req: PersonRequest =
            serde_json::from_str(r#"{"name":"a","age":3000000000}"#).unwrap();
        assert_eq!(req.age, Some(Some(3_000_000_000)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let req: PersonRequest =
            serde_json::from_str(r#"{"name":"a","id":42,"nickname":"b"}"#).unwrap();
        assert_eq!(req.name, Some(Some("a".to_string())));
    }
}
