//! Request Links
//!
//! Middleware stages for the outbound request path. Each link receives an
//! operation and its request context, may change the context on the way
//! out and inspect the outcome on the way back.
//!
//! ## Chain
//!
//! ```text
//! ErrorLink -> AuthLink -> HttpLink -> network
//! ```
//!
//! - **HttpLink**: serializes the operation and POSTs it to the endpoint
//! - **AuthLink**: injects the `authorization` header from a credential source
//! - **ErrorLink**: notifies and logs failures, never alters the outcome

mod auth;
mod error;
mod http;
mod observer;

pub use auth::AuthLink;
pub use error::{LinkError, NetworkError, Outcome};
pub use http::HttpLink;
pub use observer::ErrorLink;

use crate::context::RequestContext;
use crate::operation::Operation;
use async_trait::async_trait;
use std::sync::Arc;

/// One stage of the request pipeline
#[async_trait]
pub trait Link: Send + Sync {
    /// Run the operation through this link and everything behind it
    async fn request(&self, operation: &Operation, context: RequestContext) -> Outcome;
}

#[async_trait]
impl<L> Link for Arc<L>
where
    L: Link + ?Sized,
{
    async fn request(&self, operation: &Operation, context: RequestContext) -> Outcome {
        (**self).request(operation, context).await
    }
}

#[async_trait]
impl<L> Link for Box<L>
where
    L: Link + ?Sized,
{
    async fn request(&self, operation: &Operation, context: RequestContext) -> Outcome {
        (**self).request(operation, context).await
    }
}
