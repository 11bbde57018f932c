//! Shared-secret authentication.

use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

use super::AppState;
use crate::config::AuthConfig;
use crate::error::ApiError;

/// Reject the request with 401 unless it carries the configured secret.
///
/// Runs before any body extraction, so the outcome does not depend on the
/// method or payload.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = presented_key(&state.auth, &request);
    if !secret_matches(presented.as_deref(), &state.auth.api_key) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// The secret the caller sent: the header if present, else the query
/// parameter when one is configured.
fn presented_key(auth: &AuthConfig, request: &Request) -> Option<String> {
    if let Some(value) = request.headers().get(auth.header.as_str()) {
        return value.to_str().ok().map(str::to_owned);
    }

    let param = auth.query_param.as_deref()?;
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(request.uri()).ok()?;
    params.get(param).cloned()
}

fn secret_matches(presented: Option<&str>, expected: &str) -> bool {
    match presented {
        Some(key) if !expected.is_empty() => key.as_bytes().ct_eq(expected.as_bytes()).into(),
        _ => false,
    }
}
