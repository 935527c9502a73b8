//! Admin API route configuration.
//!
//! All endpoints here require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    clear_link_software_handler, get_link_software_handler, log_tail_handler,
    set_link_software_handler, software_map_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /software`            - List the software map
/// - `GET    /links/{id}/software` - Current selection for a link
/// - `PUT    /links/{id}/software` - Set a link's selection
/// - `DELETE /links/{id}/software` - Clear a link's selection
/// - `GET    /log/tail`            - Tail of the diagnostic log file
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/software", get(software_map_handler))
        .route(
            "/links/{id}/software",
            get(get_link_software_handler)
                .put(set_link_software_handler)
                .delete(clear_link_software_handler),
        )
        .route("/log/tail", get(log_tail_handler))
}
