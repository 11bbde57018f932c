//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, ListenConfig, AuthConfig, DatabaseConfig)
//! - [`defaults`]: serde default values
//! - [`validation`]: startup checks

mod defaults;
mod types;
mod validation;

pub use types::{AuthConfig, Config, DatabaseConfig};
pub use validation::validate;
