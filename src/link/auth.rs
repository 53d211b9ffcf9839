//! Auth Link
//!
//! Sets the `authorization` header on every outgoing operation from a
//! [`CredentialSource`]. A missing token degrades to an unauthenticated
//! request with an empty header value, never to a local error.

use super::{Link, Outcome};
use crate::context::{RequestContext, AUTHORIZATION};
use crate::credentials::CredentialSource;
use crate::operation::Operation;
use async_trait::async_trait;
use std::sync::Arc;

/// Decorates requests with a bearer token
pub struct AuthLink<L> {
    inner: L,
    credentials: Arc<dyn CredentialSource>,
}

impl<L: Link> AuthLink<L> {
    pub fn new(inner: L, credentials: Arc<dyn CredentialSource>) -> Self {
        Self { inner, credentials }
    }

    /// Apply the current token to a context
    ///
    /// All existing headers are kept. `authorization` is always set: to
    /// `Bearer <token>` when a non-empty token is available, otherwise to `""`.
    pub fn decorate(&self, mut context: RequestContext) -> RequestContext {
        let value = match self.credentials.token() {
            Some(token) if !token.is_empty() => format!("Bearer {}", token),
            _ => {
                tracing::debug!(source = self.credentials.name(), "No credential token available");
                String::new()
            }
        };

        context.set_header(AUTHORIZATION, value);
        context
    }
}

#[async_trait]
impl<L: Link> Link for AuthLink<L> {
    async fn request(&self, operation: &Operation, context: RequestContext) -> Outcome {
        let context = self.decorate(context);
        self.inner.request(operation, context).await
    }
}
