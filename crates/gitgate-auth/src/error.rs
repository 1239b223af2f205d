//! Authorization error types.

use thiserror::Error;

/// Authorization failures surfaced to the gateway.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable credentials accompanied the request.
    #[error("authentication required")]
    MissingCredentials,

    /// Credentials were presented and rejected.
    #[error("access denied: {0}")]
    Denied(String),
}
