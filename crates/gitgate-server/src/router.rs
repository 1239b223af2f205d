//! The static service table and request routing.

use axum::http::Method;
use gitgate_git::GitService;
use once_cell::sync::Lazy;
use regex::Regex;

/// What a matched table entry dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Stateless RPC round for the given service.
    Rpc(GitService),
    /// Ref advertisement handshake.
    InfoRefs,
}

struct ServiceEntry {
    method: Method,
    pattern: Regex,
    kind: RouteKind,
}

/// The three smart HTTP operations, in declaration order. The first
/// capture group of each pattern is the logical repository identifier.
static SERVICES: Lazy<Vec<ServiceEntry>> = Lazy::new(|| {
    vec![
        ServiceEntry {
            method: Method::POST,
            pattern: Regex::new(r"^(.*)/git-upload-pack$").expect("static pattern"),
            kind: RouteKind::Rpc(GitService::UploadPack),
        },
        ServiceEntry {
            method: Method::POST,
            pattern: Regex::new(r"^(.*)/git-receive-pack$").expect("static pattern"),
            kind: RouteKind::Rpc(GitService::ReceivePack),
        },
        ServiceEntry {
            method: Method::GET,
            pattern: Regex::new(r"^(.*)/info/refs$").expect("static pattern"),
            kind: RouteKind::InfoRefs,
        },
    ]
});

/// Result of routing a request against the service table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched operation.
    pub kind: RouteKind,
    /// Repository identifier captured from the URL.
    pub repo: String,
}

/// Matches method and path against the service table, first match wins.
pub fn resolve(method: &Method, path: &str) -> Option<RouteMatch> {
    SERVICES.iter().find_map(|entry| {
        if entry.method != *method {
            return None;
        }
        let captures = entry.pattern.captures(path)?;
        Some(RouteMatch {
            kind: entry.kind,
            repo: captures.get(1)?.as_str().to_string(),
        })
    })
}
