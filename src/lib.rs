//! # graphlink
//!
//! GraphQL client bootstrap: an HTTP transport decorated with an auth link
//! and an error-observing link, composed into one explicitly owned client.
//!
//! ## Features
//!
//! - **Link chain**: error observer → auth decorator → HTTP transport
//! - **Pluggable credentials**: static token, local storage, environment
//! - **Pluggable notifications**: console alerts or headless collection
//! - **Typed queries**: `GetUserQuery` decoded into [`User`]
//!
//! ## Modules
//!
//! - [`link`]: the [`Link`] trait and the three links
//! - [`client`]: [`Client`] and [`ClientBuilder`]
//! - [`credentials`]: token sources and [`LocalStorage`]
//! - [`notify`]: user-facing alert capability
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphlink::{Client, StaticToken};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder("https://api.example.com/graphql")
//!         .credentials(Arc::new(StaticToken::new("abc123")))
//!         .build()?;
//!
//!     let user = client.get_user().await?;
//!     println!("Signed in as {}", user.id);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod credentials;
pub mod link;
pub mod notify;
pub mod operation;
pub mod queries;
pub mod response;

#[cfg(test)]
mod testing;

pub use client::{Client, ClientBuilder, ClientError};

pub use config::{
    generate_default_config, ApiConfig, Config, ConfigError, CredentialsConfig, LoggingConfig,
    NotificationsConfig, NotifyMode,
};

pub use context::RequestContext;

pub use credentials::{
    CredentialSource, EnvToken, LocalStorage, NoCredentials, StaticToken, StorageError,
    StoredToken,
};

pub use link::{AuthLink, ErrorLink, HttpLink, Link, LinkError, NetworkError, Outcome};

pub use notify::{CollectingNotifier, ConsoleNotifier, Notifier, SilentNotifier};

pub use operation::Operation;

pub use queries::{GetUserQueryData, User};

pub use response::{ErrorLocation, GraphqlError, PathSegment, Response};
