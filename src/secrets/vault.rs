//! Remote Secret Store Client
//!
//! Fetches secret values from a vault over its REST API, authenticating with a
//! bearer token from a static value or a managed identity endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::error::{Result, SecretError};

const VAULT_API_VERSION: &str = "7.4";
const VAULT_RESOURCE: &str = "https://vault.azure.net";
const IMDS_TOKEN_URL: &str = "http://169.254.169.254/metadata/identity/oauth2/token";

/// A named-secret lookup service.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the current value of `name`. A missing secret is an error.
    async fn get_secret(&self, name: &str) -> Result<String>;
}

// == Credential ==
/// How the client obtains its bearer token.
#[derive(Debug, Clone)]
pub enum Credential {
    /// A pre-issued access token
    Static(String),
    /// Hosting-platform identity endpoint (`IDENTITY_ENDPOINT` + `IDENTITY_HEADER`)
    AppServiceIdentity { endpoint: String, header: String },
    /// Instance metadata service
    InstanceMetadata,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl Credential {
    /// Picks a credential from the environment.
    ///
    /// `KEY_VAULT_ACCESS_TOKEN` wins, then the platform identity endpoint, then
    /// the instance metadata service.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        if let Some(token) = var("KEY_VAULT_ACCESS_TOKEN") {
            return Credential::Static(token);
        }
        match (var("IDENTITY_ENDPOINT"), var("IDENTITY_HEADER")) {
            (Some(endpoint), Some(header)) => Credential::AppServiceIdentity { endpoint, header },
            _ => Credential::InstanceMetadata,
        }
    }

    async fn token(&self, client: &reqwest::Client) -> Result<String> {
        let request = match self {
            Credential::Static(token) => return Ok(token.clone()),
            Credential::AppServiceIdentity { endpoint, header } => client
                .get(endpoint)
                .query(&[("resource", VAULT_RESOURCE), ("api-version", "2019-08-01")])
                .header("X-IDENTITY-HEADER", header),
            Credential::InstanceMetadata => client
                .get(IMDS_TOKEN_URL)
                .query(&[("resource", VAULT_RESOURCE), ("api-version", "2018-02-01")])
                .header("Metadata", "true"),
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SecretError::Credential(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }
        let body: TokenResponse = response.json().await?;
        Ok(body.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct SecretBundle {
    value: String,
}

// == Key Vault Store ==
/// Client for one vault.
#[derive(Debug, Clone)]
pub struct KeyVaultStore {
    client: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl KeyVaultStore {
    /// Addresses the vault named `vault_name` (`https://{name}.vault.azure.net`).
    pub fn for_vault(vault_name: &str, credential: Credential) -> Result<Self> {
        let name = vault_name.trim();
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !name.starts_with('-')
            && !name.ends_with('-');
        if !valid {
            return Err(SecretError::InvalidStoreIdentifier(vault_name.to_string()));
        }

        Ok(Self::with_base_url(
            format!("https://{}.vault.azure.net", name),
            credential,
        ))
    }

    /// Addresses an arbitrary vault endpoint.
    pub fn with_base_url(base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SecretStore for KeyVaultStore {
    async fn get_secret(&self, name: &str) -> Result<String> {
        let token = self.credential.token(&self.client).await?;
        debug!(secret = name, vault = %self.base_url, "Fetching secret");

        let response = self
            .client
            .get(format!("{}/secrets/{}", self.base_url, name))
            .query(&[("api-version", VAULT_API_VERSION)])
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SecretError::Status {
                name: name.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bundle: SecretBundle = response.json().await?;
        Ok(bundle.value)
    }
}
