//! `/createHabitacion`: bulk upsert of room records
//!
//! Checks run in a fixed order: preflight, shared secret, method, payload.
//! The body is parsed by hand so a bad secret is reported before anything
//! about the payload. A body over the configured limit is a payload failure
//! like any other.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Method};
use axum::routing::{post, MethodRouter};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::content::upsert_rooms;
use crate::http_server::errors::{ApiError, ApiResult};
use crate::http_server::preflight::Preflight;
use crate::http_server::state::AppState;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

const PREFLIGHT: Preflight = Preflight::new("POST", "Content-Type, x-api-key");

#[derive(Debug, Deserialize)]
pub struct UpsertRoomsRequest {
    #[serde(default)]
    pub habitaciones: Value,
}

impl UpsertRoomsRequest {
    /// Parse the raw body; `None` unless it carries a non-empty array
    pub fn records(body: &[u8]) -> Option<Vec<Value>> {
        let request: UpsertRoomsRequest = serde_json::from_slice(body).ok()?;
        match request.habitaciones {
            Value::Array(records) if !records.is_empty() => Some(records),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn route(body_limit: usize) -> MethodRouter<Arc<AppState>> {
    post(upsert_rooms_handler)
        .options(|| async { PREFLIGHT })
        .fallback(upsert_rooms_handler)
        .layer(DefaultBodyLimit::max(body_limit))
}

async fn upsert_rooms_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let presented = headers.get(API_KEY_HEADER).map(|v| v.as_bytes());
    if !state.is_authorized(presented) {
        warn!(event = "ROOMS_UPSERT_UNAUTHORIZED", "rejected bulk upsert with bad api key");
        return Err(ApiError::Unauthorized);
    }

    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let records = body
        .ok()
        .and_then(|body| UpsertRoomsRequest::records(&body))
        .ok_or(ApiError::MissingParam("habitaciones"))?;

    let written = upsert_rooms(state.store.as_ref(), &records).map_err(ApiError::internal(
        "ROOMS_UPSERT_FAILED",
        "Error interno del servidor al crear habitación.",
    ))?;

    info!(
        event = "ROOMS_UPSERTED",
        received = records.len(),
        written,
        "bulk upsert committed"
    );

    // Counts every received record, including ones skipped for lacking an id.
    Ok(Json(MessageResponse {
        message: format!("Se crearon {} habitaciones", records.len()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_precondition() {
        assert_eq!(
            UpsertRoomsRequest::records(br#"{"habitaciones": [{"id": "r1"}]}"#).map(|r| r.len()),
            Some(1)
        );
        assert!(UpsertRoomsRequest::records(br#"{"habitaciones": []}"#).is_none());
        assert!(UpsertRoomsRequest::records(br#"{"habitaciones": "r1"}"#).is_none());
        assert!(UpsertRoomsRequest::records(br#"{"habitaciones": {"length": 2}}"#).is_none());
        assert!(UpsertRoomsRequest::records(br#"{}"#).is_none());
        assert!(UpsertRoomsRequest::records(b"").is_none());
        assert!(UpsertRoomsRequest::records(b"[1, 2]").is_none());
    }
}
