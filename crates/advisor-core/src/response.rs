//! Agent responses and their normalization to displayable text
//!
//! Agent runtimes do not hand back one stable shape: depending on provider and
//! configuration the result is raw text, a message object with a content
//! field, a JSON mapping, or something that can only be printed. [`normalize`]
//! probes these shapes in a fixed order and always produces a string.

use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

static CONTENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"content='([^']+)'").expect("content pattern is a valid regex")
});

/// A structured value that may expose a textual `content` field
pub trait ContentBearing: fmt::Debug + Send + Sync {
    /// The textual content, if the value carries any
    fn content(&self) -> Option<String>;
}

/// Raw response returned by an agent
#[derive(Debug)]
pub enum AgentResponse {
    /// Already plain text
    Text(String),
    /// A structured object that may expose a content field
    Object(Box<dyn ContentBearing>),
    /// A key/value mapping, possibly with a `content` key
    Mapping(Map<String, Value>),
    /// Only the printed representation is available
    Opaque(String),
}

impl AgentResponse {
    /// Wrap a content-bearing object
    pub fn object(value: impl ContentBearing + 'static) -> Self {
        Self::Object(Box::new(value))
    }

    /// Classify a JSON value by shape
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(map) => Self::Mapping(map),
            other => Self::Opaque(other.to_string()),
        }
    }

    /// Generic textual representation used by the last two fallback steps
    fn representation(&self) -> String {
        match self {
            Self::Text(text) | Self::Opaque(text) => text.clone(),
            Self::Object(object) => format!("{object:?}"),
            Self::Mapping(map) => Value::Object(map.clone()).to_string(),
        }
    }
}

impl From<String> for AgentResponse {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AgentResponse {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Extract a displayable text payload from any agent response
///
/// Probes in order, first match wins:
/// 1. plain text is returned unchanged
/// 2. an object's textual content field
/// 3. a mapping's non-null `content` entry
/// 4. the `content='...'` capture inside the printed representation
/// 5. the printed representation itself
pub fn normalize(response: &AgentResponse) -> String {
    match response {
        AgentResponse::Text(text) => return text.clone(),
        AgentResponse::Object(object) => {
            if let Some(content) = object.content() {
                return content;
            }
        }
        AgentResponse::Mapping(map) => match map.get("content") {
            Some(Value::String(content)) => return content.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        },
        AgentResponse::Opaque(_) => {}
    }

    let printed = response.representation();
    match CONTENT_PATTERN.captures(&printed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().to_string(),
        None => printed,
    }
}
