//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::SocketAddr;

// =============================================================================
// Listen Defaults
// =============================================================================

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

// =============================================================================
// Auth Defaults
// =============================================================================

pub fn default_auth_header() -> String {
    "X-API-Key".to_string()
}

// =============================================================================
// Database Defaults
// =============================================================================

pub fn default_db_driver() -> String {
    "mysql".to_string()
}

pub fn default_db_host() -> String {
    "localhost".to_string()
}

pub fn default_db_user() -> String {
    "api_user".to_string()
}

pub fn default_db_name() -> String {
    "wifi_data".to_string()
}
