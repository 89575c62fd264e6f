//! Secret Provider Module
//!
//! Resolves the API key (cached) and arbitrary secrets (uncached), preferring
//! the remote store and falling back to environment variables when no store
//! is configured.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use super::cache::SecretCache;
use super::clock::Clock;
use super::error::{Result, SecretError};
use super::vault::{Credential, KeyVaultStore, SecretStore};
use super::API_KEY_CACHE_TTL_SECS;

/// Fallback variable holding the API key
pub const API_KEY_VAR: &str = "API_KEY";

/// Fallback variable holding the database connection string
pub const SQL_CONNECTION_STRING_VAR: &str = "SqlConnectionString";

// == Env Source ==
/// Where fallback lookups read variables from.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The process environment
    #[default]
    Process,
    /// A fixed set of variables
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    /// Builds a fixed source from `(name, value)` pairs.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvSource::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Looks up `name`. An empty name is never set.
    pub fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        match self {
            EnvSource::Process => std::env::var(name).ok(),
            EnvSource::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

struct RemoteSecrets {
    store: Arc<dyn SecretStore>,
    api_key_secret_name: String,
}

// == Secret Provider ==
/// Shared by every request; built once at startup.
pub struct SecretProvider {
    remote: Option<RemoteSecrets>,
    api_key_cache: SecretCache,
    env: EnvSource,
    clock: Arc<dyn Clock>,
}

impl SecretProvider {
    /// Creates a provider with remote lookup disabled.
    pub fn env_only(env: EnvSource, clock: Arc<dyn Clock>) -> Self {
        Self {
            remote: None,
            api_key_cache: SecretCache::new(Duration::seconds(API_KEY_CACHE_TTL_SECS)),
            env,
            clock,
        }
    }

    /// Creates a provider backed by `store`, fetching the API key from
    /// `api_key_secret_name`.
    pub fn with_store(
        store: Arc<dyn SecretStore>,
        api_key_secret_name: impl Into<String>,
        env: EnvSource,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            remote: Some(RemoteSecrets {
                store,
                api_key_secret_name: api_key_secret_name.into(),
            }),
            ..Self::env_only(env, clock)
        }
    }

    /// Startup entry point.
    ///
    /// A blank store identifier or API key secret name disables remote lookup;
    /// otherwise a vault client is constructed for the identifier with an empty
    /// cache.
    pub fn initialize(
        store_identifier: Option<&str>,
        api_key_secret_name: Option<&str>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let store_identifier = store_identifier.filter(|s| !s.trim().is_empty());
        let secret_name = api_key_secret_name.filter(|s| !s.trim().is_empty());

        match (store_identifier, secret_name) {
            (Some(vault), Some(secret_name)) => {
                let store = KeyVaultStore::for_vault(vault, Credential::from_env())?;
                info!(vault = %store.base_url(), "Secret store configured");
                Ok(Self::with_store(
                    Arc::new(store),
                    secret_name,
                    EnvSource::Process,
                    clock,
                ))
            }
            _ => {
                info!("No secret store configured, using environment variables");
                Ok(Self::env_only(EnvSource::Process, clock))
            }
        }
    }

    /// True when a remote store handle exists.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    // == API Key ==
    /// Returns the expected API key.
    ///
    /// With a store, the value is served from cache until it expires and then
    /// refetched. Without one, `API_KEY` is read on every call.
    pub async fn get_api_key(&self) -> Result<Option<String>> {
        let remote = match &self.remote {
            Some(remote) if !remote.api_key_secret_name.is_empty() => remote,
            _ => return Ok(self.env.var(API_KEY_VAR)),
        };

        if let Some(cached) = self.api_key_cache.get(self.clock.now()).await {
            return Ok(Some(cached));
        }

        debug!("API key cache miss, fetching from secret store");
        let value = remote.store.get_secret(&remote.api_key_secret_name).await?;
        self.api_key_cache
            .store(value.clone(), self.clock.now())
            .await;
        Ok(Some(value))
    }

    // == Arbitrary Secrets ==
    /// Fetches `name` straight from the store, or reads the variable `name`
    /// when there is no store or the name is blank.
    pub async fn get_secret(&self, name: Option<&str>) -> Result<Option<String>> {
        let name = name.unwrap_or_default();
        match &self.remote {
            Some(remote) if !name.trim().is_empty() => {
                remote.store.get_secret(name).await.map(Some)
            }
            _ => Ok(self.env.var(name)),
        }
    }

    /// Resolves the database URL.
    ///
    /// With a store, only the secret `secret_name` is consulted; an unset name
    /// or blank value is an error. Without one, the variable `secret_name` is
    /// read, then `SqlConnectionString`.
    pub async fn connection_string(&self, secret_name: Option<&str>) -> Result<String> {
        let non_blank = |v: &String| !v.trim().is_empty();

        let value = match &self.remote {
            Some(remote) => match secret_name.filter(|n| !n.trim().is_empty()) {
                Some(name) => Some(remote.store.get_secret(name).await?),
                None => None,
            },
            None => self
                .get_secret(secret_name)
                .await?
                .filter(non_blank)
                .or_else(|| self.env.var(SQL_CONNECTION_STRING_VAR)),
        };

        value
            .filter(non_blank)
            .ok_or(SecretError::MissingConnectionString)
    }
}
