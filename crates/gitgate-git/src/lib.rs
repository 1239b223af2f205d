//! Git protocol primitives for the gitgate gateway.
//!
//! Implements the pkt-line framing used by the smart HTTP handshake and
//! the identities of the two pack-protocol services the gateway fronts.

mod error;
mod pktline;
mod service;

pub use error::GitError;
pub use pktline::{PktLine, PktLineReader};
pub use service::GitService;

/// Result type for git protocol operations.
pub type Result<T> = std::result::Result<T, GitError>;
