//! Test server management.
//!
//! Spawns and manages ssidd instances for integration testing.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

pub const SECRET: &str = "s3cr3t";

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    _data_dir: TempDir,
}

impl TestServer {
    /// Spawn a server backed by a fresh SQLite store with the schema applied.
    pub async fn spawn() -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let db_path = data_dir.path().join("ssids.db");
        create_store(&db_path).await?;
        let db_url = format!("sqlite://{}", db_path.display());
        Self::spawn_with_db_url(data_dir, &db_url).await
    }

    /// Spawn a server whose store cannot be reached.
    pub async fn spawn_unreachable() -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let missing = data_dir.path().join("missing").join("ssids.db");
        let db_url = format!("sqlite://{}", missing.display());
        Self::spawn_with_db_url(data_dir, &db_url).await
    }

    async fn spawn_with_db_url(data_dir: TempDir, db_url: &str) -> anyhow::Result<Self> {
        let port = free_port()?;

        // The secret comes from the environment, not the file.
        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[listen]
address = "127.0.0.1:{}"

[database]
url = "{}"
"#,
            port, db_url
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(binary_path())
            .arg(&config_path)
            .env("API_KEY", SECRET)
            .env_remove("DATABASE_URL")
            .env_remove("DB_PASSWORD")
            .spawn()?;

        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };

        // Wait for server to start listening
        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ssidd"))
}

/// Ask the OS for an unused port.
fn free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

async fn create_store(path: &Path) -> anyhow::Result<()> {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await?;
    sqlx::query(include_str!("../../schema/sqlite.sql"))
        .execute(&mut conn)
        .await?;
    conn.close().await?;
    Ok(())
}
