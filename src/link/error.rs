//! Link error types

use crate::response::{GraphqlError, Response};
use serde_json::Value;
use thiserror::Error;

/// Resolved result of an operation
pub type Outcome = Result<Response, LinkError>;

/// Failed outcome of an operation
#[derive(Error, Debug)]
pub enum LinkError {
    /// The API answered with one or more structured errors
    #[error("GraphQL errors: {}", join_messages(.errors))]
    Graphql {
        errors: Vec<GraphqlError>,
        /// Partial data sent alongside the errors, if any
        data: Option<Value>,
    },

    /// No usable GraphQL response was received
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

impl LinkError {
    /// Structured error descriptors (empty for network failures)
    pub fn graphql_errors(&self) -> &[GraphqlError] {
        match self {
            LinkError::Graphql { errors, .. } => errors,
            LinkError::Network(_) => &[],
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, LinkError::Network(_))
    }
}

/// Transport-level failures
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid response body: {0}")]
    Decode(String),
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LinkError::Graphql {
            errors: vec![GraphqlError::new("Unauthorized"), GraphqlError::new("Forbidden")],
            data: None,
        };
        assert_eq!(err.to_string(), "GraphQL errors: Unauthorized; Forbidden");
        assert_eq!(err.graphql_errors().len(), 2);
        assert!(!err.is_network());

        let err: LinkError = NetworkError::HttpStatus {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Network error: HTTP 502: bad gateway");
        assert!(err.graphql_errors().is_empty());
        assert!(err.is_network());
    }
}
