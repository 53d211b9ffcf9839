//! HTTP Transport Link
//!
//! Terminal link: POSTs the operation to the GraphQL endpoint and turns the
//! reply into an [`Outcome`]. One network call per operation, no retries,
//! no timeout beyond what the underlying client enforces.

use super::{Link, LinkError, NetworkError, Outcome};
use crate::context::RequestContext;
use crate::operation::Operation;
use crate::response::{Response, WireResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};

/// Longest body excerpt kept in an HTTP status error
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Transport link for a fixed GraphQL endpoint
#[derive(Debug, Clone)]
pub struct HttpLink {
    client: Client,
    endpoint: String,
}

impl HttpLink {
    /// Create a transport link with a default HTTP client
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("graphlink/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, endpoint))
    }

    /// Create a transport link over an existing HTTP client
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Link for HttpLink {
    async fn request(&self, operation: &Operation, context: RequestContext) -> Outcome {
        let headers = header_map(&context)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .headers(headers)
            .json(operation)
            .send()
            .await
            .map_err(NetworkError::Request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(NetworkError::Request)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "Received GraphQL response"
        );

        interpret(status, &body)
    }
}

/// Convert the request context into HTTP headers
fn header_map(context: &RequestContext) -> Result<HeaderMap, NetworkError> {
    let mut headers = HeaderMap::with_capacity(context.len());

    for (name, value) in context.headers() {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| NetworkError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| NetworkError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Classify an HTTP reply
///
/// A GraphQL-shaped body wins over the status code: servers commonly send
/// structured errors with 4xx/5xx statuses.
fn interpret(status: StatusCode, body: &[u8]) -> Outcome {
    match WireResponse::parse(body) {
        Some(wire) if !wire.errors.is_empty() => Err(LinkError::Graphql {
            errors: wire.errors,
            data: wire.data,
        }),
        Some(wire) => Ok(Response {
            data: wire.data,
            extensions: wire.extensions,
        }),
        None if !status.is_success() => Err(NetworkError::HttpStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect(),
        }
        .into()),
        None => Err(NetworkError::Decode(format!(
            "expected a GraphQL response object ({} bytes received)",
            body.len()
        ))
        .into()),
    }
}
