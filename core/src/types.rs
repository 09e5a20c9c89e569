//! Domain DTOs for the `/todo` collection resource.
//!
//! # Design
//! These mirror the server's schema but are defined independently of the
//! mock-server crate; integration tests catch any schema drift. Ids are
//! always assigned by the server and kept as opaque strings.

use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item as held by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub item: String,
}

/// Payload for `POST /todo`. Carries no id: the server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub item: String,
}

/// Payload for `PUT /todo/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateItem {
    pub item: String,
}

/// Every successful body from the collection resource wraps its payload in
/// a `data` field.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Accept `"7"` as well as `7`; some backends send integer ids.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_accepts_string_id() {
        let item: Item = serde_json::from_str(r#"{"id":"1","item":"Wash car"}"#).unwrap();
        assert_eq!(item.id, "1");
        assert_eq!(item.item, "Wash car");
    }

    #[test]
    fn item_accepts_integer_id() {
        let item: Item = serde_json::from_str(r#"{"id":2,"item":"Code project AZ"}"#).unwrap();
        assert_eq!(item.id, "2");
    }

    #[test]
    fn item_rejects_missing_text() {
        let result: Result<Item, _> = serde_json::from_str(r#"{"id":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_item_has_no_id_field() {
        let body = serde_json::to_value(NewItem {
            item: "Call dentist".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "item": "Call dentist" }));
    }

    #[test]
    fn error_body_code_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"boom"}"#).unwrap();
        assert_eq!(body.detail, "boom");
        assert!(body.error_code.is_none());
    }
}
