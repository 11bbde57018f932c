//! Database gateway for the SSID table.
//!
//! Provides async access to the relational backing store using SQLx's
//! runtime-selected `Any` driver, so the same code talks to MySQL in
//! production and SQLite in tests.
//!
//! There is no pool: every request opens its own connection through
//! [`Database::connect`] and gets back a [`Session`]. Session operations
//! consume the session and close the connection on every exit path.

mod ssids;

pub use ssids::{Ssid, SsidRecord};

use sqlx::any::{AnyConnectOptions, install_default_drivers};
use sqlx::{AnyConnection, Connection};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid connection options: {0}")]
    Config(sqlx::Error),
    #[error("connection failed: {0}")]
    Connect(sqlx::Error),
    #[error("database error: {0}")]
    Query(sqlx::Error),
    #[error("store did not report an id for the inserted row")]
    MissingInsertId,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Query(err)
    }
}

/// Handle to the backing store.
///
/// Cheap to clone; holds only the parsed connection options.
#[derive(Clone)]
pub struct Database {
    options: AnyConnectOptions,
}

impl Database {
    /// Prepare a gateway for the configured store. Does not connect.
    pub fn new(config: &DatabaseConfig) -> Result<Self, DbError> {
        Self::from_url(&config.connection_url())
    }

    /// Prepare a gateway from a connection URL.
    pub fn from_url(url: &str) -> Result<Self, DbError> {
        install_default_drivers();
        let options = AnyConnectOptions::from_str(url).map_err(DbError::Config)?;
        Ok(Self { options })
    }

    /// Open a connection to the store.
    pub async fn connect(&self) -> Result<Session, DbError> {
        let conn = AnyConnection::connect_with(&self.options)
            .await
            .map_err(DbError::Connect)?;
        debug!(backend = conn.backend_name(), "Store connection opened");
        Ok(Session { conn })
    }
}

/// One live store connection, scoped to a single operation.
pub struct Session {
    conn: AnyConnection,
}

impl Session {
    /// Close the connection, logging (not propagating) any failure.
    async fn release(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "Failed to close store connection cleanly");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for tests that need a real store.

    use super::*;
    use tempfile::TempDir;

    /// Schema for the SQLite backend, as shipped for operators.
    pub const SQLITE_SCHEMA: &str = include_str!("../../schema/sqlite.sql");

    /// A SQLite database file inside a temporary directory.
    pub struct TestStore {
        pub dir: TempDir,
        pub url: String,
    }

    impl TestStore {
        /// Create an empty database file without the `ssids` table.
        pub async fn empty() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let url = format!("sqlite://{}", dir.path().join("ssids.db").display());

            install_default_drivers();
            let conn = AnyConnection::connect(&format!("{}?mode=rwc", url))
                .await
                .unwrap();
            conn.close().await.unwrap();

            Self { dir, url }
        }

        /// Create a database file with the `ssids` table in place.
        pub async fn with_schema() -> Self {
            let store = Self::empty().await;
            let mut conn = AnyConnection::connect(&store.url).await.unwrap();
            sqlx::query(SQLITE_SCHEMA).execute(&mut conn).await.unwrap();
            conn.close().await.unwrap();
            store
        }

        pub fn database(&self) -> Database {
            Database::from_url(&self.url).unwrap()
        }
    }

    /// URL of a store that cannot be reached.
    pub fn unreachable_url() -> String {
        "sqlite:///nonexistent-ssidd-dir/ssids.db".to_string()
    }
}
