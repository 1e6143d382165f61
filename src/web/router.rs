//! Router configuration.

use std::path::Path;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, submit_application, submit_project, AppState};
use super::middleware::{api_rate_limit, create_cors_layer, security_headers, RateLimitState};

/// Create the form API router with its middleware stack.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limit: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    let api_routes = Router::new()
        .route("/project", post(submit_project))
        .route("/application", post(submit_application))
        .layer(middleware::from_fn(move |req, next| {
            let state = rate_limit.clone();
            api_rate_limit(state, req, next)
        }));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create the health check router, mounted outside the rate-limited API tree.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health))
}

/// Create the static site router.
///
/// Serves files under `static_path` and falls back to `index.html` for any
/// unmatched route, single-page style. Returns `None` when the directory does
/// not exist (API-only deployment).
pub fn create_static_router(static_path: &str, cache_max_age_secs: u64) -> Option<Router> {
    let dir = Path::new(static_path);
    if !dir.is_dir() {
        tracing::warn!(path = %static_path, "static directory not found, site serving disabled");
        return None;
    }

    let index = dir.join("index.html");
    let service = ServeDir::new(dir).fallback(ServeFile::new(index));

    let cache_value = HeaderValue::from_str(&format!("public, max-age={cache_max_age_secs}"))
        .expect("cache header value is always valid ASCII");
    let cache_header =
        SetResponseHeaderLayer::if_not_present(header::CACHE_CONTROL, cache_value);

    Some(Router::new().fallback_service(service).layer(cache_header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_create_static_router_missing_dir() {
        assert!(create_static_router("does/not/exist", 3600).is_none());
    }
}
