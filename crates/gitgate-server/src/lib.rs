//! HTTP gateway for git's smart transport.
//!
//! Routes the three smart HTTP operations (upload-pack RPC, receive-pack
//! RPC, ref advertisement), gates each behind a pluggable
//! [`Authorizer`](gitgate_auth::Authorizer), and bridges request/response
//! bodies through an external `git` process. Pack negotiation and object
//! transfer are git's job; the gateway frames HTTP and streams bytes.

#![forbid(unsafe_code)]

mod error;
mod gateway;
mod gitbin;
mod middleware;
mod router;
mod session;

pub use error::GatewayError;
pub use gateway::Gateway;
pub use gitbin::GitBinary;
pub use router::{resolve, RouteKind, RouteMatch};

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
