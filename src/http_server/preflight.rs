//! CORS preflight responses
//!
//! `Access-Control-Allow-Origin` is added to every response by the server's
//! header layer; this module only answers `OPTIONS` with the endpoint's
//! allow lists.

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Allow lists advertised by one endpoint's preflight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preflight {
    pub methods: &'static str,
    pub headers: &'static str,
}

impl Preflight {
    pub const fn new(methods: &'static str, headers: &'static str) -> Self {
        Self { methods, headers }
    }
}

impl IntoResponse for Preflight {
    fn into_response(self) -> Response {
        (
            StatusCode::NO_CONTENT,
            [
                (ACCESS_CONTROL_ALLOW_METHODS, self.methods),
                (ACCESS_CONTROL_ALLOW_HEADERS, self.headers),
            ],
        )
            .into_response()
    }
}

/// Fallback for verbs an endpoint does not serve
pub async fn method_not_allowed() -> Response {
    super::errors::ApiError::MethodNotAllowed.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_headers() {
        let response = Preflight::new("POST", "Content-Type, x-api-key").into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, x-api-key"
        );
    }
}
