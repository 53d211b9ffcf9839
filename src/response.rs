//! GraphQL Responses
//!
//! Successful response payloads and the structured error descriptors a
//! server attaches to a failed one.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Successful GraphQL response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Result data (may be `null` for operations that select nothing)
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Position of an error within the operation document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// Segment of a response path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(i64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Structured error descriptor returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.locations.push(ErrorLocation { line, column });
        self
    }

    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Locations rendered as `line:column` pairs, comma separated
    pub fn locations_display(&self) -> String {
        self.locations
            .iter()
            .map(|l| format!("{}:{}", l.line, l.column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Path rendered with `.` between segments
    pub fn path_display(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        PathSegment::Index(index)
    }
}

/// Reads `null` as an empty list
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw response body as sent over the wire
#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<GraphqlError>,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl WireResponse {
    /// Parse a body if it is shaped like a GraphQL response
    ///
    /// The body must be a JSON object with a `data` or `errors` key.
    pub(crate) fn parse(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let is_graphql = value
            .as_object()
            .map(|obj| obj.contains_key("data") || obj.contains_key("errors"))
            .unwrap_or(false);

        if !is_graphql {
            return None;
        }

        serde_json::from_value(value).ok()
    }
}
