//! Secrets Module
//!
//! Resolves the API key and database connection string, preferring a remote
//! secret store and falling back to environment variables.
//!
//! # Components
//! - `SecretProvider`: cached API key lookup plus uncached arbitrary secrets
//! - `KeyVaultStore`: remote store client speaking the vault REST API
//! - `Clock`: injectable time source used for cache expiry

mod cache;
mod clock;
mod error;
mod provider;
mod vault;

pub use cache::SecretCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, SecretError};
pub use provider::{EnvSource, SecretProvider, API_KEY_VAR, SQL_CONNECTION_STRING_VAR};
pub use vault::{Credential, KeyVaultStore, SecretStore};

// == Public Constants ==
/// How long a fetched API key is served from the cache, in seconds
pub const API_KEY_CACHE_TTL_SECS: i64 = 15 * 60;
