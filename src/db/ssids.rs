//! SSID records: the single table this daemon reads and writes.

use super::{DbError, Session};
use chrono::{NaiveDateTime, SecondsFormat};
use serde::Serialize;
use sqlx::{AnyConnection, Connection};
use tracing::warn;

/// A non-empty SSID as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ssid(String);

impl Ssid {
    /// Returns `None` for the empty string.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A persisted SSID row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SsidRecord {
    pub id: i64,
    pub ssid: String,
    pub timestamp: String,
}

impl Session {
    /// Insert one SSID and return the id the store assigned to it.
    ///
    /// Runs in a transaction: committed on success, rolled back on failure.
    pub async fn insert_ssid(mut self, ssid: &Ssid) -> Result<i64, DbError> {
        let result = insert(&mut self.conn, ssid).await;
        self.release().await;
        result
    }

    /// Fetch every SSID row, in whatever order the store returns them.
    pub async fn list_ssids(mut self) -> Result<Vec<SsidRecord>, DbError> {
        let result = list(&mut self.conn).await;
        self.release().await;
        result
    }
}

async fn insert(conn: &mut AnyConnection, ssid: &Ssid) -> Result<i64, DbError> {
    let mut tx = conn.begin().await?;

    let result = sqlx::query("INSERT INTO ssids (ssid) VALUES (?)")
        .bind(ssid.as_str())
        .execute(&mut *tx)
        .await;

    match result {
        Ok(done) => {
            let id = match done.last_insert_id() {
                Some(id) => id,
                None => last_insert_id(&mut *tx).await?,
            };
            tx.commit().await?;
            Ok(id)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!(error = %rollback, "Rollback after failed insert also failed");
            }
            Err(DbError::Query(e))
        }
    }
}

/// Ask the backend for the id generated by the previous insert on this connection.
async fn last_insert_id(conn: &mut AnyConnection) -> Result<i64, DbError> {
    let sql = match conn.backend_name() {
        name if name.eq_ignore_ascii_case("sqlite") => "SELECT last_insert_rowid()",
        name if name.eq_ignore_ascii_case("mysql") => "SELECT CAST(LAST_INSERT_ID() AS SIGNED)",
        _ => return Err(DbError::MissingInsertId),
    };
    let id = sqlx::query_scalar::<_, i64>(sql).fetch_one(&mut *conn).await?;
    Ok(id)
}

async fn list(conn: &mut AnyConnection) -> Result<Vec<SsidRecord>, DbError> {
    // The timestamp is read as text so every backend decodes it the same way.
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        r#"
        SELECT id, ssid, CAST(timestamp AS CHAR)
        FROM ssids
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, ssid, timestamp)| SsidRecord {
            id,
            ssid,
            timestamp: normalize_timestamp(&timestamp),
        })
        .collect())
}

/// Render a store timestamp as ISO-8601 UTC.
///
/// MySQL and SQLite both hand back `YYYY-MM-DD HH:MM:SS[.fff]` in UTC.
/// Anything else is returned untouched.
fn normalize_timestamp(raw: &str) -> String {
    // sqlx pins the MySQL session time zone to +00:00 on connect.
    // SQLite's CURRENT_TIMESTAMP is UTC already.
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        Ok(ts) => ts.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Err(_) => raw.to_string(),
    }
}
