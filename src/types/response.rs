//! Response type definitions
//!
//! Defines how fetched bodies are kept between session steps and the shapes
//! handed back to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Board id to board name
pub type Boards = BTreeMap<String, String>;

/// Profile data of the logged-in user
pub type UserData = serde_json::Map<String, Value>;

/// Body of the most recent response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body started with `{` and parsed as JSON
    Json(Value),
    /// Anything else, including JSON that failed to parse
    Raw(String),
}

impl ResponseBody {
    /// Classify a raw body
    pub fn parse(raw: String) -> Self {
        if !raw.starts_with('{') {
            return Self::Raw(raw);
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                tracing::warn!("Response looked like JSON but failed to parse: {}", e);
                Self::Raw(raw)
            }
        }
    }

    /// Parsed JSON, if any
    pub fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Raw text, if the body was not JSON
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Raw(raw) => Some(raw),
        }
    }

    /// Look up a JSON pointer inside a parsed body
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.json().and_then(|value| value.pointer(pointer))
    }

    /// True for an empty string or an empty JSON document
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Json(value) => !crate::types::is_truthy(value),
            Self::Raw(raw) => raw.is_empty(),
        }
    }
}

/// Most recently fetched response, as seen by the step that issued it
#[derive(Debug, Clone, PartialEq)]
pub struct LastResponse {
    /// Parsed or raw body
    pub body: ResponseBody,
    /// Response headers, repeated names kept in order
    pub headers: Vec<(String, String)>,
}

impl LastResponse {
    /// Create a new stored response
    pub fn new(body: ResponseBody, headers: Vec<(String, String)>) -> Self {
        Self { body, headers }
    }

    /// All `Set-Cookie` header values
    pub fn set_cookies(&self) -> impl Iterator<Item = &str> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("set-cookie"))
            .map(|(_, value)| value.as_str())
    }
}

/// Output of a successful pin creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinCreated {
    /// The new pin id
    #[serde(rename = "pinId")]
    pub pin_id: String,
}

impl PinCreated {
    /// Create a new pin creation output
    pub fn new(pin_id: impl Into<String>) -> Self {
        Self {
            pin_id: pin_id.into(),
        }
    }
}
