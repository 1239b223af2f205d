//! Request middleware: the access log and the cache-defeating headers.

use axum::extract::{ConnectInfo, Request};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

/// Logs exactly one line per request on the `access` target: peer address,
/// method, URI, and the observed final status. Runs outside routing so
/// unmatched and denied requests are recorded too.
pub(crate) async fn access_log(request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(
        target: "access",
        peer = %peer,
        status = response.status().as_u16(),
        "{method} {uri}"
    );
    response
}

/// Smart HTTP's bidirectional streams are incompatible with caching and
/// with connection reuse under buggy intermediary buffering; every
/// response gets cache-defeating headers and a close directive.
pub(crate) async fn no_cache(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::EXPIRES,
        HeaderValue::from_static("Fri, 01 Jan 1980 00:00:00 GMT"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, max-age=0, must-revalidate"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
