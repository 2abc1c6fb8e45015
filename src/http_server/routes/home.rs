//! `/getHomePageContent`: hero content for the homepage

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::content::home::{hero_image, load_or_create_home_page};
use crate::http_server::errors::{ApiError, ApiResult};
use crate::http_server::preflight::{method_not_allowed, Preflight};
use crate::http_server::state::AppState;

const PREFLIGHT: Preflight = Preflight::new("GET, POST", "Content-Type");

#[derive(Debug, Serialize)]
pub struct HomePageResponse {
    #[serde(rename = "heroImage", skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<Value>,
}

pub fn route() -> MethodRouter<Arc<AppState>> {
    // `get` alone would also run the handler, and its write, for HEAD
    get(home_page_handler)
        .head(method_not_allowed)
        .options(|| async { PREFLIGHT })
        .fallback(method_not_allowed)
}

/// May write the default settings document on first call
async fn home_page_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<HomePageResponse>> {
    let doc = load_or_create_home_page(state.store.as_ref(), &state.hero_placeholder_url).map_err(
        ApiError::internal(
            "HOME_PAGE_FETCH_FAILED",
            "Error interno del servidor al obtener datos.",
        ),
    )?;

    Ok(Json(HomePageResponse {
        hero_image: hero_image(&doc),
    }))
}
