//! `/getHabitaciones` and `/getHabitacion`: room listing and lookup
//!
//! Query strings are read as raw pairs so a repeated key never turns into a
//! framework rejection; a parameter only counts when it appears once.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde::Serialize;

use crate::content::{find_room, list_rooms};
use crate::http_server::errors::{ApiError, ApiResult};
use crate::http_server::preflight::{method_not_allowed, Preflight};
use crate::http_server::state::AppState;
use crate::store::Document;

const PREFLIGHT: Preflight = Preflight::new("GET", "Content-Type");

type QueryPairs = Vec<(String, String)>;

/// Value of `name` when it appears exactly once
fn single_param(pairs: &[(String, String)], name: &str) -> Option<String> {
    let mut values = pairs.iter().filter(|(key, _)| key == name).map(|(_, v)| v);
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value.clone()),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct ListRoomsQuery {
    /// Only the exact value `true` restricts to featured rooms
    pub destacadas: Option<String>,
}

impl ListRoomsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            destacadas: single_param(pairs, "destacadas"),
        }
    }

    pub fn featured_only(&self) -> bool {
        self.destacadas.as_deref() == Some("true")
    }
}

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub habitaciones: Vec<Document>,
}

#[derive(Debug, Default)]
pub struct GetRoomQuery {
    pub id: Option<String>,
}

impl GetRoomQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            id: single_param(pairs, "id"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub habitacion: Document,
}

pub fn list_route() -> MethodRouter<Arc<AppState>> {
    get(list_rooms_handler)
        .head(method_not_allowed)
        .options(|| async { PREFLIGHT })
        .fallback(method_not_allowed)
}

pub fn get_route() -> MethodRouter<Arc<AppState>> {
    get(get_room_handler)
        .head(method_not_allowed)
        .options(|| async { PREFLIGHT })
        .fallback(method_not_allowed)
}

async fn list_rooms_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Json<RoomsResponse>> {
    let query = ListRoomsQuery::from_pairs(&pairs);
    let habitaciones = list_rooms(state.store.as_ref(), query.featured_only()).map_err(
        ApiError::internal(
            "ROOMS_FETCH_FAILED",
            "Error interno del servidor al obtener habitaciones.",
        ),
    )?;

    Ok(Json(RoomsResponse { habitaciones }))
}

async fn get_room_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Json<RoomResponse>> {
    let id = GetRoomQuery::from_pairs(&pairs)
        .id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingParam("id"))?;

    let habitacion = find_room(state.store.as_ref(), &id)
        .map_err(ApiError::internal(
            "ROOM_FETCH_FAILED",
            "Error interno del servidor al obtener habitación.",
        ))?
        .ok_or(ApiError::RoomNotFound)?;

    Ok(Json(RoomResponse { habitacion }))
}
