//! ssidd - SSID registry daemon
//!
//! Accepts and lists wireless network identifiers over HTTP, backed by a
//! single relational table and gated by a shared-secret header.

mod config;
mod db;
mod error;
mod http;
mod telemetry;

use crate::config::Config;
use crate::db::Database;
use crate::http::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let mut config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    config.apply_env(|key| std::env::var(key).ok());

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(path = %config_path, "Invalid configuration: {}", e);
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See messages above.",
            errors.len()
        ));
    }

    let db = Database::new(&config.database)?;
    info!(
        listen = %config.listen.address,
        auth_header = %config.auth.header,
        query_param = config.auth.query_param.as_deref().unwrap_or("-"),
        "Starting ssidd"
    );

    let state = AppState::new(db, config.auth);
    http::serve(config.listen.address, state).await?;

    Ok(())
}
