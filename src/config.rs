//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Secret store identifier (vault name); `None` disables remote lookups
    pub key_vault_name: Option<String>,
    /// Name of the secret holding the API key
    pub api_key_secret_name: Option<String>,
    /// Name of the secret holding the database connection string
    pub sql_connection_string_secret_name: Option<String>,
    /// Books published this many years ago or earlier get archived
    pub archive_threshold_years: i32,
    /// Seconds between scheduled archival runs, 0 disables the scheduler
    pub archival_interval: u64,
    /// Maximum number of pooled database connections
    pub max_db_connections: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 7071)
    /// - `KeyVaultName` - Secret store identifier (default: unset)
    /// - `ApiKeySecretName` - API key secret name (default: unset)
    /// - `SqlConnectionStringSecretName` - Connection string secret name (default: unset)
    /// - `ARCHIVE_THRESHOLD_YEARS` - Archival age threshold, negative values ignored (default: 10)
    /// - `ARCHIVAL_INTERVAL` - Scheduled archival frequency in seconds (default: 0)
    /// - `DB_MAX_CONNECTIONS` - Connection pool size (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            key_vault_name: non_blank_var("KeyVaultName"),
            api_key_secret_name: non_blank_var("ApiKeySecretName"),
            sql_connection_string_secret_name: non_blank_var("SqlConnectionStringSecretName"),
            archive_threshold_years: non_negative_var("ARCHIVE_THRESHOLD_YEARS")
                .unwrap_or(defaults.archive_threshold_years),
            archival_interval: parsed_var("ARCHIVAL_INTERVAL")
                .unwrap_or(defaults.archival_interval),
            max_db_connections: parsed_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_db_connections),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 7071,
            key_vault_name: None,
            api_key_secret_name: None,
            sql_connection_string_secret_name: None,
            archive_threshold_years: 10,
            archival_interval: 0,
            max_db_connections: 5,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_negative_var(name: &str) -> Option<i32> {
    parsed_var::<i32>(name).filter(|v| *v >= 0)
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
