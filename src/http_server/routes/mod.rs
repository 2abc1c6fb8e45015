//! Endpoint routes
//!
//! Paths keep the names the website's frontend already calls.

pub mod availability;
pub mod health;
pub mod home;
pub mod rooms;
pub mod upsert;

use std::sync::Arc;

use axum::Router;

use super::state::AppState;

pub const HOME_PAGE_PATH: &str = "/getHomePageContent";
pub const LIST_ROOMS_PATH: &str = "/getHabitaciones";
pub const GET_ROOM_PATH: &str = "/getHabitacion";
pub const AVAILABILITY_PATH: &str = "/getDisponibilidad";
pub const UPSERT_ROOMS_PATH: &str = "/createHabitacion";

/// All site endpoints bound to `state`; bulk upsert bodies are capped at
/// `upsert_body_limit` bytes
pub fn api_routes(state: Arc<AppState>, upsert_body_limit: usize) -> Router {
    Router::new()
        .route(HOME_PAGE_PATH, home::route())
        .route(LIST_ROOMS_PATH, rooms::list_route())
        .route(GET_ROOM_PATH, rooms::get_route())
        .route(AVAILABILITY_PATH, availability::route())
        .route(UPSERT_ROOMS_PATH, upsert::route(upsert_body_limit))
        .with_state(state)
}
