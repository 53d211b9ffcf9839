//! GraphQL Operations
//!
//! An [`Operation`] is one query or mutation invocation: the document text,
//! an optional operation name, and its variables. Operations are immutable
//! once built and serialize to the standard GraphQL-over-HTTP request body.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single GraphQL query or mutation with its variables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    #[serde(rename = "query")]
    document: String,
    variables: Map<String, Value>,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Operation {
    /// Create an operation from a document with no variables
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            variables: Map::new(),
            name: None,
        }
    }

    /// Set the operation name sent as `operationName`
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a variable
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Replace all variables at once
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn variable_values(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Label used in logs: the operation name, or "anonymous"
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_body_with_name_and_variables() {
        let op = Operation::new("query Q($id: ID!) { node(id: $id) { id } }")
            .named("Q")
            .variable("id", "42");

        let body = serde_json::to_value(&op).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "query Q($id: ID!) { node(id: $id) { id } }",
                "variables": { "id": "42" },
                "operationName": "Q"
            })
        );
    }

    #[test]
    fn test_wire_body_omits_missing_operation_name() {
        let op = Operation::new("{ ping }");
        let body = serde_json::to_value(&op).unwrap();

        assert!(body.get("operationName").is_none());
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn test_label_falls_back_to_anonymous() {
        assert_eq!(Operation::new("{ ping }").label(), "anonymous");
        assert_eq!(Operation::new("{ ping }").named("Ping").label(), "Ping");
    }
}
