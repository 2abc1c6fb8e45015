//! `/getDisponibilidad`: room id -> availability
//!
//! Answers every verb except `OPTIONS` with the availability map; unlike the
//! other endpoints there is no 405.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde::Serialize;

use crate::content::availability;
use crate::http_server::errors::{ApiError, ApiResult};
use crate::http_server::preflight::Preflight;
use crate::http_server::state::AppState;

const PREFLIGHT: Preflight = Preflight::new("GET", "Content-Type");

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub disponibilidad: BTreeMap<String, bool>,
}

pub fn route() -> MethodRouter<Arc<AppState>> {
    get(availability_handler)
        .options(|| async { PREFLIGHT })
        .fallback(availability_handler)
}

async fn availability_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<AvailabilityResponse>> {
    let disponibilidad = availability(state.store.as_ref()).map_err(ApiError::internal(
        "AVAILABILITY_FETCH_FAILED",
        "Error interno del servidor al obtener disponibilidad.",
    ))?;

    Ok(Json(AvailabilityResponse { disponibilidad }))
}
