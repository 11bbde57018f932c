//! Core configuration types and loading.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Shared-secret authentication.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Backing store configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay secrets from the environment.
    ///
    /// Recognised variables:
    /// - `API_KEY`: shared secret (`auth.api_key`)
    /// - `DB_PASSWORD`: store password (`database.password`)
    /// - `DATABASE_URL`: full connection URL (`database.url`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY") {
            self.auth.api_key = key;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = password;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (default: "0.0.0.0:5000").
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

/// Shared-secret authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// The secret every request must present. Usually supplied via `API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Header carrying the secret (default: "X-API-Key").
    #[serde(default = "default_auth_header")]
    pub header: String,
    /// Optional query parameter accepted when the header is absent.
    #[serde(default)]
    pub query_param: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            header: default_auth_header(),
            query_param: None,
        }
    }
}

/// Backing store configuration.
///
/// Either a full `url` (e.g. `sqlite:///var/lib/ssidd/ssids.db`) or the
/// individual MySQL-style credentials below.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; overrides the individual fields when set.
    pub url: Option<String>,
    /// URL scheme used when building from parts (default: "mysql").
    #[serde(default = "default_db_driver")]
    pub driver: String,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_user")]
    pub user: String,
    /// Usually supplied via `DB_PASSWORD`.
    #[serde(default)]
    pub password: String,
    /// Database (schema) name.
    #[serde(default = "default_db_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            driver: default_db_driver(),
            host: default_db_host(),
            user: default_db_user(),
            password: String::new(),
            name: default_db_name(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL handed to the store driver.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let user = utf8_percent_encode(&self.user, NON_ALPHANUMERIC);
        if self.password.is_empty() {
            format!("{}://{}@{}/{}", self.driver, user, self.host, self.name)
        } else {
            let password = utf8_percent_encode(&self.password, NON_ALPHANUMERIC);
            format!(
                "{}://{}:{}@{}/{}",
                self.driver, user, password, self.host, self.name
            )
        }
    }
}
