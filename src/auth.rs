//! API key authorization
//!
//! Every endpoint asks an `AuthChecker` whether the request may proceed before
//! touching the body or the store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::secrets::{Result, SecretProvider};

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Decides whether a request is authorized.
#[async_trait]
pub trait AuthChecker: Send + Sync {
    /// `Ok(false)` rejects the request; `Err` means the expected key could not
    /// be resolved at all.
    async fn is_authorized(&self, headers: &HeaderMap) -> Result<bool>;
}

/// Compares `X-API-Key` against the provider's current key.
pub struct ApiKeyAuth {
    secrets: Arc<SecretProvider>,
}

impl ApiKeyAuth {
    pub fn new(secrets: Arc<SecretProvider>) -> Self {
        Self { secrets }
    }
}

#[async_trait]
impl AuthChecker for ApiKeyAuth {
    async fn is_authorized(&self, headers: &HeaderMap) -> Result<bool> {
        // Non-visible-ASCII header values count as absent
        let presented = match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Ok(false),
        };

        let expected = self.secrets.get_api_key().await?;
        Ok(expected.as_deref() == Some(presented))
    }
}
