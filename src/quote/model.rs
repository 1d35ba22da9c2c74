//! Quote data model
//!
//! A remote `Quote` keeps the upstream JSON object it was parsed from and
//! serializes back to exactly that object. `content`, `author` and `tags` are
//! typed copies used for HTML rendering.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::{Map, Value};

const API_ERROR: &str = "api_error";

/// A single quotation
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    /// Set only when the quote came from the local fallback table
    pub api_error: bool,
    payload: Map<String, Value>,
}

/// Fields the server itself reads from a payload
#[derive(Deserialize)]
struct Fields {
    content: String,
    author: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl Quote {
    /// Parse an upstream response body
    ///
    /// Fails when the body is not a JSON object with a non-empty `content`
    /// and an `author`. A missing or null `tags` is accepted.
    pub fn from_payload(body: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
        let fields = Fields::deserialize(&value).map_err(|e| e.to_string())?;
        let Value::Object(payload) = value else {
            return Err("quote payload is not a JSON object".to_string());
        };
        if fields.content.trim().is_empty() {
            return Err("quote content is empty".to_string());
        }
        Ok(Self {
            content: fields.content,
            author: fields.author,
            tags: fields.tags.unwrap_or_default(),
            api_error: false,
            payload,
        })
    }

    /// Locally authored quote with a JSON form built from its fields
    pub fn local(content: &str, author: &str, tags: Vec<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("content".to_string(), Value::from(content));
        payload.insert("author".to_string(), Value::from(author));
        payload.insert("tags".to_string(), Value::from(tags.clone()));
        Self {
            content: content.to_string(),
            author: author.to_string(),
            tags,
            api_error: false,
            payload,
        }
    }
}

/// Writes the stored payload. `api_error: true` is emitted only for the
/// flag, never taken from the payload.
impl Serialize for Quote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.payload {
            if key == API_ERROR && (self.api_error || *value == Value::Bool(true)) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        if self.api_error {
            map.serialize_entry(API_ERROR, &true)?;
        }
        map.end()
    }
}
