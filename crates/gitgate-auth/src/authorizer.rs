//! The authorization capability and its stock implementations.

use async_trait::async_trait;
use http::HeaderMap;
use std::collections::HashMap;

use crate::credentials::parse_basic_credentials;
use crate::{AuthError, Result};

/// Capability consulted before any git subprocess runs.
///
/// Given the raw request headers and the logical repository identifier,
/// grant access by returning `Ok(())` or deny it with an error the gateway
/// turns into 401/403. Implementations may perform network calls of their
/// own; the gateway treats the call as opaque, possibly slow, and possibly
/// failing.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Decides whether this request may touch `repo`.
    async fn authorize(&self, headers: &HeaderMap, repo: &str) -> Result<()>;
}

/// Grants every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Authorizer for AllowAll {
    async fn authorize(&self, _headers: &HeaderMap, _repo: &str) -> Result<()> {
        Ok(())
    }
}

/// Denies every request with a fixed reason.
#[derive(Debug, Clone)]
pub struct DenyAll {
    reason: String,
}

impl DenyAll {
    /// Creates a deny-all authorizer reporting `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Authorizer for DenyAll {
    async fn authorize(&self, _headers: &HeaderMap, _repo: &str) -> Result<()> {
        Err(AuthError::Denied(self.reason.clone()))
    }
}

/// Checks Basic credentials against a static username/password table.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    /// Creates an empty credential table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an accepted username/password pair.
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }

    /// Returns true if no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl Authorizer for StaticCredentials {
    async fn authorize(&self, headers: &HeaderMap, repo: &str) -> Result<()> {
        let creds = parse_basic_credentials(headers).ok_or(AuthError::MissingCredentials)?;
        match self.users.get(&creds.username) {
            Some(expected) if *expected == creds.password => Ok(()),
            _ => Err(AuthError::Denied(format!(
                "bad credentials for user {:?} on {}",
                creds.username, repo
            ))),
        }
    }
}
