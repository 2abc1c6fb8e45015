//! # HTTP Server
//!
//! Combines the site endpoints and the health check into one router and
//! serves it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::ServerConfig;
use super::routes::api_routes;
use super::routes::health::health_routes;
use super::state::AppState;
use crate::store::DocumentStore;

/// HTTP server for the hotel site
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Build the server around an already opened store
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, store: Arc<dyn DocumentStore>) -> Router {
        let state = Arc::new(AppState::new(
            store,
            config.api_key.clone(),
            config.hero_placeholder_url.clone(),
        ));

        let allow_origin =
            HeaderValue::from_str(&config.allow_origin).unwrap_or(HeaderValue::from_static("*"));

        Router::new()
            .merge(health_routes())
            .merge(api_routes(state, config.upsert_body_limit))
            // Every response carries the origin header, errors and preflights included
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                allow_origin,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(event = "SERVER_LISTENING", address = %addr, "hotel site API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!(event = "SERVER_STOPPED", "hotel site API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
