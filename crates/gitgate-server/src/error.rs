//! Gateway error types and their HTTP renderings.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors a request can end in.
///
/// Every variant maps to an HTTP status plus a short plain-text body.
/// Internal detail (paths, exit codes, stderr) reaches only the log.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No entry in the service table matched.
    #[error("no matching git service")]
    NotFound,

    /// Credentials absent; the client should retry with some.
    #[error("authentication required")]
    Unauthorized,

    /// Credentials present and rejected.
    #[error("access denied: {0}")]
    Forbidden(String),

    /// Malformed request, e.g. a bad `service` query value.
    #[error("{0}")]
    BadRequest(String),

    /// The git subprocess failed to start or exited abnormally.
    #[error("git process failure: {0}")]
    Process(String),

    /// I/O failure while bridging streams.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::NotFound => (StatusCode::NOT_FOUND, "not found\n").into_response(),
            GatewayError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"git\"")],
                "authentication required\n",
            )
                .into_response(),
            GatewayError::Forbidden(reason) => {
                tracing::warn!(%reason, "request denied");
                (StatusCode::FORBIDDEN, "access denied\n").into_response()
            }
            GatewayError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("{message}\n")).into_response()
            }
            GatewayError::Process(detail) => {
                tracing::error!(%detail, "git subprocess failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error\n").into_response()
            }
            GatewayError::Io(error) => {
                tracing::error!(%error, "request I/O failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error\n").into_response()
            }
        }
    }
}
