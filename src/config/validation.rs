//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use axum::http::HeaderName;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("auth.api_key is required (set it in the config file or via API_KEY)")]
    MissingApiKey,
    #[error("auth.header must not be empty")]
    EmptyAuthHeader,
    #[error("auth.header is not a valid HTTP header name: '{0}'")]
    InvalidAuthHeader(String),
    #[error("auth.query_param must not be empty when set")]
    EmptyQueryParam,
    #[error("database.host is required when database.url is not set")]
    MissingDatabaseHost,
    #[error("database.name is required when database.url is not set")]
    MissingDatabaseName,
    #[error("database.url must not be empty")]
    EmptyDatabaseUrl,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // An empty secret would let a request without the header through.
    if config.auth.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }
    if config.auth.header.trim().is_empty() {
        errors.push(ValidationError::EmptyAuthHeader);
    } else if HeaderName::from_bytes(config.auth.header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidAuthHeader(config.auth.header.clone()));
    }
    if let Some(param) = &config.auth.query_param
        && param.trim().is_empty()
    {
        errors.push(ValidationError::EmptyQueryParam);
    }

    match &config.database.url {
        Some(url) if url.trim().is_empty() => errors.push(ValidationError::EmptyDatabaseUrl),
        Some(_) => {}
        None => {
            if config.database.host.is_empty() {
                errors.push(ValidationError::MissingDatabaseHost);
            }
            if config.database.name.is_empty() {
                errors.push(ValidationError::MissingDatabaseName);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
