//! Access logging for the action endpoints.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Logs method, path, status and duration of each request.
///
/// Static asset hits go to `debug`, server-side failures to `warn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(%method, %path, status, duration_ms, "Request failed");
    } else if path.starts_with("/static/") {
        debug!(%method, %path, status, duration_ms, "Static asset served");
    } else {
        info!(%method, %path, status, duration_ms, "HTTP request");
    }

    response
}
