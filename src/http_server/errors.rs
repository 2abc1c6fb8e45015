//! # API Errors
//!
//! Every handler failure collapses into one of these. Bodies are plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Request handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("Falta el parámetro {0}.")]
    MissingParam(&'static str),

    /// Bad or missing shared secret
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested room does not exist
    #[error("Habitación no encontrada.")]
    RoomNotFound,

    /// Wrong HTTP verb
    #[error("Método no permitido.")]
    MethodNotAllowed,

    /// Store failure; the caller only sees `message`
    #[error("{message}")]
    Internal {
        event: &'static str,
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Wrap a store failure with the endpoint's generic message
    pub fn internal(event: &'static str, message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Internal {
            event,
            message,
            source,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::RoomNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { event, source, .. } = &self {
            error!(event = *event, error = %source, "store operation failed");
        }
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingParam("id").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::RoomNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_internal_hides_store_detail() {
        let err = ApiError::internal("ROOMS_FETCH_FAILED", "Error interno del servidor al obtener habitaciones.")(
            StoreError::Poisoned,
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error interno del servidor al obtener habitaciones.");
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::MissingParam("id").to_string(), "Falta el parámetro id.");
        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Método no permitido.");
    }
}
