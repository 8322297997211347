//! CORS layer built from `server.cors`.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use fip_action_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// A `"*"` entry in origins or headers allows any value; unparsable
/// entries are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if allows_any(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins))
    };

    let headers = if allows_any(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>(&config.allowed_headers))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .allow_headers(headers)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn allows_any(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

fn parse_all<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}
