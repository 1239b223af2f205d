//! Gateway construction and request dispatch.

use axum::extract::{Query, Request, State};
use axum::http::{header, Uri};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::Router;
use gitgate_auth::Authorizer;
use gitgate_git::GitService;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::gitbin::GitBinary;
use crate::middleware::{access_log, no_cache};
use crate::router::{resolve, RouteKind};
use crate::session::Session;
use crate::{GatewayError, Result};

/// The smart HTTP gateway: configuration shared by all requests,
/// immutable after construction.
pub struct Gateway {
    repo_root: PathBuf,
    git: GitBinary,
    authorizer: Box<dyn Authorizer>,
}

impl Gateway {
    /// Builds a gateway serving the repositories under `repo_root`.
    pub fn new(
        repo_root: impl Into<PathBuf>,
        git: GitBinary,
        authorizer: Box<dyn Authorizer>,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            git,
            authorizer,
        }
    }

    /// Turns the gateway into a router pluggable into any hyper listener.
    ///
    /// Every path shape must reach the service table, so dispatch is the
    /// router's fallback rather than a fixed set of routes.
    pub fn into_router(self) -> Router {
        Router::new()
            .fallback(dispatch)
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(no_cache))
            .layer(from_fn(access_log))
            .with_state(Arc::new(self))
    }

    async fn handle(&self, request: Request) -> Result<Response> {
        let matched =
            resolve(request.method(), request.uri().path()).ok_or(GatewayError::NotFound)?;

        if let Err(denial) = self
            .authorizer
            .authorize(request.headers(), &matched.repo)
            .await
        {
            // Absent credentials earn a Basic challenge so the client can
            // retry with some; rejected credentials are final.
            return Err(if request.headers().contains_key(header::AUTHORIZATION) {
                GatewayError::Forbidden(denial.to_string())
            } else {
                GatewayError::Unauthorized
            });
        }

        let session = Session::new(self.resolve_repo_path(&matched.repo)?, self.git.clone());

        match matched.kind {
            RouteKind::Rpc(service) => {
                tracing::debug!(
                    service = service.as_str(),
                    repo = %session.repo_path().display(),
                    "rpc session"
                );
                let body = session.rpc(service, request.into_body())?;
                Ok((
                    [(header::CONTENT_TYPE, service.result_content_type())],
                    body,
                )
                    .into_response())
            }
            RouteKind::InfoRefs => {
                let service = advertised_service(request.uri())?;
                tracing::debug!(
                    service = service.as_str(),
                    repo = %session.repo_path().display(),
                    "advertisement session"
                );
                let payload = session.advertise(service).await?;
                Ok((
                    [(header::CONTENT_TYPE, service.advertisement_content_type())],
                    payload,
                )
                    .into_response())
            }
        }
    }

    /// Joins the captured identifier onto the repository root. Identifiers
    /// with parent-directory or absolute components never escape the root.
    fn resolve_repo_path(&self, repo: &str) -> Result<PathBuf> {
        let relative = Path::new(repo.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(GatewayError::NotFound);
        }
        Ok(self.repo_root.join(relative))
    }
}

async fn dispatch(State(gateway): State<Arc<Gateway>>, request: Request) -> Response {
    match gateway.handle(request).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

/// Validates the advertisement `service` query parameter: exactly one of
/// the two RPC service names is accepted.
fn advertised_service(uri: &Uri) -> Result<GitService> {
    let Query(params): Query<HashMap<String, String>> = Query::try_from_uri(uri)
        .map_err(|e| GatewayError::BadRequest(format!("invalid query string: {e}")))?;
    let name = params.get("service").map(String::as_str).unwrap_or("");
    GitService::from_name(name)
        .ok_or_else(|| GatewayError::BadRequest(format!("invalid service parameter: {name:?}")))
}
