//! Pluggable authorization for the gitgate gateway.
//!
//! The gateway consults a single-method [`Authorizer`] capability before
//! any git process runs. Implementations are interchangeable values handed
//! to the gateway at construction time; this crate ships an allow-all, a
//! deny-all, and a static-credential-table implementation.

mod authorizer;
mod credentials;
mod error;

pub use authorizer::{AllowAll, Authorizer, DenyAll, StaticCredentials};
pub use credentials::{parse_basic_credentials, Credentials};
pub use error::AuthError;

/// Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthError>;
