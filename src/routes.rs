//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check (public)
//! - `/api/*`      - Admin API (Bearer token required, rate limited)
//! - everything else - intercept fallback: tracked-link redirect or 404
//!
//! Matching the admin and health routes before the fallback is what keeps
//! administrative traffic out of the intercept pipeline; the fallback is the
//! single entry point the redirect core is invoked from.

use crate::api;
use crate::api::handlers::{health_handler, intercept_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket
///   address; enable only when the service runs behind a trusted reverse
///   proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = if behind_proxy {
        api_router.layer(rate_limit::proxied_layer())
    } else {
        api_router.layer(rate_limit::peer_layer())
    };

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback(intercept_handler)
        .with_state(state)
        .layer(tracing::layer())
}
