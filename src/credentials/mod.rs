//! Credential Sources
//!
//! Strategies for looking up the bearer token attached to outgoing requests.
//! Lookups are synchronous and happen once per request, so a token changed
//! in storage is picked up by the next operation.
//!
//! - [`StaticToken`]: a fixed literal
//! - [`StoredToken`]: a key in [`LocalStorage`] (default key `authToken`)
//! - [`EnvToken`]: an environment variable
//! - [`NoCredentials`]: always unauthenticated

mod storage;

pub use storage::{default_storage_path, LocalStorage, StorageError, DEFAULT_TOKEN_KEY};

/// Token lookup capability
pub trait CredentialSource: Send + Sync {
    /// Current token, if any
    fn token(&self) -> Option<String>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

/// A token fixed at construction
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.token.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

// Keep literal tokens out of debug output
impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

/// A token read from local storage on every lookup
#[derive(Debug, Clone)]
pub struct StoredToken {
    storage: LocalStorage,
    key: String,
}

impl StoredToken {
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read `authToken` from the given storage
    pub fn auth_token(storage: LocalStorage) -> Self {
        Self::new(storage, DEFAULT_TOKEN_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CredentialSource for StoredToken {
    fn token(&self) -> Option<String> {
        match self.storage.get_item(&self.key) {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "Token lookup failed");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "storage"
    }
}

/// A token read from an environment variable on every lookup
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }

    fn name(&self) -> &str {
        "env"
    }
}

/// Never provides a token
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn token(&self) -> Option<String> {
        None
    }

    fn name(&self) -> &str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_static_token() {
        let source = StaticToken::new("abc123");
        assert_eq!(source.token().as_deref(), Some("abc123"));
        assert_eq!(format!("{:?}", source), "StaticToken { .. }");
    }

    #[test]
    fn test_stored_token_sees_later_writes() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        let source = StoredToken::auth_token(storage.clone());

        assert_eq!(source.token(), None);

        storage.set_item("authToken", "abc123").unwrap();
        assert_eq!(source.token().as_deref(), Some("abc123"));

        storage.remove_item("authToken").unwrap();
        assert_eq!(source.token(), None);
    }

    #[test]
    fn test_stored_token_unreadable_storage_is_no_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let source = StoredToken::auth_token(LocalStorage::new(path));
        assert_eq!(source.token(), None);
    }

    #[test]
    fn test_env_token() {
        let var = "GRAPHLINK_TEST_ENV_TOKEN_7f3a";
        let source = EnvToken::new(var);
        assert_eq!(source.token(), None);

        std::env::set_var(var, "from-env");
        assert_eq!(source.token().as_deref(), Some("from-env"));
        std::env::remove_var(var);
    }

    #[test]
    fn test_no_credentials() {
        assert_eq!(NoCredentials.token(), None);
        assert_eq!(NoCredentials.name(), "none");
    }
}
