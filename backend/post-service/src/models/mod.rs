/// Data models for post-service
///
/// This module defines structures for:
/// - Identifier: entity ids as they arrive in paths and request bodies
/// - Post / NewPost / PostPayload: posts and their request bodies
/// - User / NewUser: users referenced by posts
/// - Tag / TagPayload: free-form tags
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Entity identifier.
///
/// Stores assign integer ids, but clients may send ids as JSON numbers or
/// strings. Strings holding a base-10 integer are normalized to `Int`, so
/// `"7"` and `7` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Text(String),
}

impl Identifier {
    /// Integer form, if any. Text identifiers never match a store-assigned id.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Identifier::Int(value) => Some(*value),
            Identifier::Text(_) => None,
        }
    }

    /// Identifier carried in a request body field, or `None` when the value is
    /// falsy (`null`, `false`, `0`, `""`).
    ///
    /// Whole-valued floats such as `1.0` map to `Int`; every other truthy value
    /// becomes `Text` and so never matches a store-assigned id.
    pub fn from_json(value: &Value) -> Option<Self> {
        if !is_truthy(value) {
            return None;
        }
        Some(match value {
            Value::Number(number) => match number.as_i64().or_else(|| whole_number(number)) {
                Some(int) => Identifier::Int(int),
                None => Identifier::Text(number.to_string()),
            },
            Value::String(text) => Identifier::from(text.as_str()),
            other => Identifier::Text(other.to_string()),
        })
    }
}

// Largest magnitude at which every f64 integer is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn whole_number(number: &serde_json::Number) -> Option<i64> {
    number
        .as_f64()
        .filter(|value| value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER)
        .map(|value| value as i64)
}

/// JSON truthiness: `null`, `false`, zero and the empty string are falsy.
/// Arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Int(value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        match value.parse::<i64>() {
            Ok(int) => Identifier::Int(int),
            Err(_) => Identifier::Text(value),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::from(value.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(value) => write!(f, "{}", value),
            Identifier::Text(value) => f.write_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Identifier::Int(value),
            Raw::Text(value) => Identifier::from(value),
        })
    }
}

/// A persisted post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: Identifier,
    pub text: String,
}

/// Validated post fields, used for both inserts and updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: Identifier,
    pub text: String,
}

/// Post request body exactly as the client sent it.
///
/// Only `userId` and `text` are read; other keys ride along and are echoed
/// back by updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostPayload(pub Map<String, Value>);

impl PostPayload {
    /// Returns `None` unless both `userId` and `text` are present and truthy.
    ///
    /// Non-string `text` values are stored in their JSON form (`5` becomes `"5"`).
    pub fn to_new_post(&self) -> Option<NewPost> {
        let user_id = self.0.get("userId").and_then(Identifier::from_json)?;
        let text = match self.0.get("text")? {
            value if !is_truthy(value) => return None,
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        Some(NewPost { user_id, text })
    }
}

/// A user; only its existence matters to the post routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
}

/// A tag: store-assigned id plus whatever attributes the client sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Tag request body. Any JSON object is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagPayload(pub Map<String, Value>);

impl TagPayload {
    /// Attributes to persist; an `id` key never overrides the stored id.
    pub fn into_attributes(self) -> Map<String, Value> {
        let mut attributes = self.0;
        attributes.remove("id");
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_normalizes_numeric_strings() {
        let from_string: Identifier = serde_json::from_value(json!("42")).unwrap();
        let from_number: Identifier = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(from_string, Identifier::Int(42));
        assert_eq!(from_string, from_number);

        let text: Identifier = serde_json::from_value(json!("u1")).unwrap();
        assert_eq!(text, Identifier::Text("u1".to_string()));
        assert_eq!(text.as_int(), None);
    }

    #[test]
    fn identifier_rejects_non_scalar_values() {
        assert!(serde_json::from_value::<Identifier>(json!(true)).is_err());
        assert!(serde_json::from_value::<Identifier>(json!({"id": 1})).is_err());
    }

    fn new_post(body: Value) -> Option<NewPost> {
        serde_json::from_value::<PostPayload>(body)
            .unwrap()
            .to_new_post()
    }

    #[test]
    fn payload_requires_truthy_user_id_and_text() {
        for body in [
            json!({}),
            json!({"userId": 1}),
            json!({"text": "hello"}),
            json!({"userId": "", "text": "hello"}),
            json!({"userId": 0, "text": "hello"}),
            json!({"userId": 0.0, "text": "hello"}),
            json!({"userId": false, "text": "hello"}),
            json!({"userId": null, "text": "hello"}),
            json!({"userId": 3, "text": ""}),
            json!({"userId": 3, "text": 0}),
            json!({"userId": 3, "text": null}),
        ] {
            assert!(new_post(body.clone()).is_none(), "body: {}", body);
        }

        assert_eq!(
            new_post(json!({"userId": "3", "text": "hello"})),
            Some(NewPost {
                user_id: Identifier::Int(3),
                text: "hello".to_string(),
            })
        );
    }

    #[test]
    fn payload_accepts_any_truthy_field_type() {
        let post = new_post(json!({"userId": 1.0, "text": 5})).unwrap();
        assert_eq!(post.user_id, Identifier::Int(1));
        assert_eq!(post.text, "5");

        let post = new_post(json!({"userId": true, "text": true})).unwrap();
        assert_eq!(post.user_id, Identifier::Text("true".to_string()));
        assert_eq!(post.text, "true");

        let post = new_post(json!({"userId": 1.5, "text": ["a"]})).unwrap();
        assert_eq!(post.user_id, Identifier::Text("1.5".to_string()));
        assert_eq!(post.text, r#"["a"]"#);
    }

    #[test]
    fn truthiness_follows_json_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(-0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn post_uses_camel_case_user_id() {
        let post = Post {
            id: 1,
            user_id: Identifier::Int(2),
            text: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({"id": 1, "userId": 2, "text": "hi"})
        );
    }

    #[test]
    fn tag_flattens_attributes_and_drops_client_id() {
        let payload: TagPayload =
            serde_json::from_value(json!({"id": 99, "tag": "rust"})).unwrap();
        let tag = Tag {
            id: 5,
            attributes: payload.into_attributes(),
        };
        assert_eq!(
            serde_json::to_value(&tag).unwrap(),
            json!({"id": 5, "tag": "rust"})
        );
    }
}
