//! Request Context
//!
//! Per-operation header map threaded through the link chain. Each operation
//! owns its context; links receive it by value and pass it on.

use std::collections::BTreeMap;

/// Header name set by the auth link
pub const AUTHORIZATION: &str = "authorization";

/// Outgoing headers for a single operation
///
/// Header names are case-insensitive and stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    headers: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style header insert
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Insert or replace a header, returning the previous value
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_are_case_insensitive() {
        let mut ctx = RequestContext::new().with_header("X-Trace-Id", "abc");
        assert_eq!(ctx.header("x-trace-id"), Some("abc"));

        let previous = ctx.set_header("x-TRACE-id", "def");
        assert_eq!(previous.as_deref(), Some("abc"));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.header("X-Trace-Id"), Some("def"));
    }

    #[test]
    fn test_empty_header_value_is_kept() {
        let ctx = RequestContext::new().with_header(AUTHORIZATION, "");
        assert_eq!(ctx.header("Authorization"), Some(""));
        assert!(!ctx.is_empty());
    }
}
