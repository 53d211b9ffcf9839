//! GraphQL Client
//!
//! Owns the composed link chain. Built explicitly by whoever owns the
//! application root and passed down from there.

use crate::config::{Config, CredentialsConfig, NotifyMode};
use crate::context::RequestContext;
use crate::credentials::{
    default_storage_path, CredentialSource, EnvToken, LocalStorage, NoCredentials, StaticToken,
    StoredToken,
};
use crate::link::{AuthLink, ErrorLink, HttpLink, Link, LinkError, Outcome};
use crate::notify::{ConsoleNotifier, Notifier, SilentNotifier};
use crate::operation::Operation;
use crate::queries::{self, GetUserQueryData, User};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Errors surfaced to callers of [`Client`]
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    #[error("Response contained no data")]
    MissingData,

    #[error("Failed to decode response data: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// GraphQL API client
#[derive(Clone)]
pub struct Client {
    link: Arc<dyn Link>,
    endpoint: String,
}

impl Client {
    /// Start building a client for an endpoint URL
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    /// Wrap an already composed link chain
    pub fn from_link(link: Arc<dyn Link>, endpoint: impl Into<String>) -> Self {
        Self {
            link,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run an operation through the chain
    ///
    /// Every call is sent independently; nothing is cached or merged.
    pub async fn execute(&self, operation: &Operation) -> Outcome {
        self.execute_with(operation, RequestContext::new()).await
    }

    /// Run an operation with caller-provided headers
    pub async fn execute_with(&self, operation: &Operation, context: RequestContext) -> Outcome {
        let operation_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "operation",
            operation_id = %operation_id,
            operation_name = operation.label(),
        );

        async {
            tracing::debug!(endpoint = %self.endpoint, "Sending operation");
            self.link.request(operation, context).await
        }
        .instrument(span)
        .await
    }

    /// Run an operation and decode its `data` payload
    pub async fn query<T: DeserializeOwned>(&self, operation: &Operation) -> Result<T, ClientError> {
        let response = self.execute(operation).await?;

        match response.data {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
            _ => Err(ClientError::MissingData),
        }
    }

    /// Fetch the authenticated user
    pub async fn get_user(&self) -> Result<User, ClientError> {
        let data: GetUserQueryData = self.query(&queries::get_user()).await?;
        Ok(data.get_user_query)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Composes the error, auth and transport links into a [`Client`]
pub struct ClientBuilder {
    endpoint: String,
    credentials: Arc<dyn CredentialSource>,
    notifier: Arc<dyn Notifier>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Defaults: no credentials, console notifications, default HTTP client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials: Arc::new(NoCredentials),
            notifier: Arc::new(ConsoleNotifier::new()),
            http: None,
        }
    }

    /// Configure endpoint, credential source and notifier from a [`Config`]
    pub fn from_config(config: &Config) -> Self {
        let credentials: Arc<dyn CredentialSource> = match &config.credentials {
            CredentialsConfig::Static { token } => Arc::new(StaticToken::new(token.clone())),
            CredentialsConfig::Storage { path, key } => {
                let path = path.clone().unwrap_or_else(default_storage_path);
                Arc::new(StoredToken::new(LocalStorage::new(path), key.clone()))
            }
            CredentialsConfig::Env { var } => Arc::new(EnvToken::new(var.clone())),
            CredentialsConfig::Anonymous => Arc::new(NoCredentials),
        };

        let notifier: Arc<dyn Notifier> = match config.notifications.mode {
            NotifyMode::Console => Arc::new(ConsoleNotifier::new()),
            NotifyMode::Blocking => Arc::new(ConsoleNotifier::blocking()),
            NotifyMode::Silent => Arc::new(SilentNotifier),
        };

        Self::new(config.api.endpoint())
            .credentials(credentials)
            .notifier(notifier)
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Use a preconfigured HTTP client for the transport
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let transport = match self.http {
            Some(http) => HttpLink::with_client(http, self.endpoint.clone()),
            None => HttpLink::new(self.endpoint.clone())?,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            credentials = self.credentials.name(),
            "Building GraphQL client"
        );

        let chain = ErrorLink::new(AuthLink::new(transport, self.credentials), self.notifier);

        Ok(Client::from_link(Arc::new(chain), self.endpoint))
    }
}
