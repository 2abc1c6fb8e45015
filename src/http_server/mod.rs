//! # HTTP Server Module
//!
//! Axum server exposing the hotel site endpoints.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/getHomePageContent` - Homepage hero image
//! - `/getHabitaciones` - Room listing, optionally featured only
//! - `/getHabitacion` - Single room by id
//! - `/getDisponibilidad` - Availability per room
//! - `/createHabitacion` - Bulk room upsert (shared secret)

pub mod config;
pub mod errors;
pub mod preflight;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig, StoreKind};
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::AppState;
