//! Integration test common infrastructure.
//!
//! Provides utilities for spawning the daemon against a throwaway SQLite
//! store and calling its HTTP API.

pub mod server;

#[allow(unused_imports)]
pub use server::TestServer;
