//! `/ssids` handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::AppState;
use crate::db::{Ssid, SsidRecord};
use crate::error::ApiError;

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: i64,
}

/// `POST /ssids` with `{"ssid": "..."}`.
pub async fn create_ssid(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let body = body.map_err(reject_body)?;
    let ssid = parse_ssid(&body).ok_or(ApiError::MissingSsid)?;

    let session = state.db.connect().await.map_err(ApiError::Connection)?;
    let id = session.insert_ssid(&ssid).await.map_err(ApiError::Write)?;

    info!(id, ssid = ssid.as_str(), "SSID created");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "SSID created successfully",
            id,
        }),
    ))
}

/// `GET /ssids`.
pub async fn list_ssids(
    State(state): State<AppState>,
) -> Result<Json<Vec<SsidRecord>>, ApiError> {
    let session = state.db.connect().await.map_err(ApiError::Connection)?;
    let records = session.list_ssids().await.map_err(ApiError::Read)?;

    debug!(count = records.len(), "SSIDs listed");
    Ok(Json(records))
}

/// Body rejections render as JSON like every other failure.
fn reject_body(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyTooLarge
    } else {
        ApiError::MissingSsid
    }
}

/// Pull a non-empty string `ssid` out of a JSON object body.
fn parse_ssid(body: &[u8]) -> Option<Ssid> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    let ssid = payload.get("ssid")?.as_str()?;
    Ssid::new(ssid)
}
