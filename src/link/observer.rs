//! Error Link
//!
//! Observes every outcome of the chain behind it. Structured API errors are
//! reported to the notifier and logged one by one; network errors are only
//! logged. The outcome itself is always returned untouched.

use super::{Link, LinkError, Outcome};
use crate::context::RequestContext;
use crate::notify::Notifier;
use crate::operation::Operation;
use async_trait::async_trait;
use std::sync::Arc;

/// Error message that triggers the extra unauthorized warning
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Diagnostic wrapper around a link chain
pub struct ErrorLink<L> {
    inner: L,
    notifier: Arc<dyn Notifier>,
}

impl<L: Link> ErrorLink<L> {
    pub fn new(inner: L, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner, notifier }
    }

    fn observe(&self, operation: &Operation, error: &LinkError) {
        match error {
            LinkError::Graphql { errors, .. } => {
                for err in errors {
                    self.notifier.notify(err);

                    tracing::error!(
                        operation = operation.label(),
                        "[GraphQL error]: Message: {}, Location: {}, Path: {}",
                        err.message,
                        err.locations_display(),
                        err.path_display()
                    );

                    if err.message == UNAUTHORIZED_MESSAGE {
                        tracing::warn!("User is unauthorized. Redirecting to login...");
                    }
                }
            }
            LinkError::Network(e) => {
                tracing::error!(operation = operation.label(), "[Network error]: {}", e);
            }
        }
    }
}

#[async_trait]
impl<L: Link> Link for ErrorLink<L> {
    async fn request(&self, operation: &Operation, context: RequestContext) -> Outcome {
        let outcome = self.inner.request(operation, context).await;

        if let Err(error) = &outcome {
            self.observe(operation, error);
        }

        outcome
    }
}
