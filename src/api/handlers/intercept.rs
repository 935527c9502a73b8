//! Router-fallback handler running the intercept pipeline.

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use crate::application::services::InterceptOutcome;
use crate::state::AppState;

/// Intercepts any request no other route claimed.
///
/// # Request Flow
///
/// 1. Normalize the path and filter out non-candidates
/// 2. Resolve the slug against the link store (enabled links only)
/// 3. Resolve the link's software selection (link id, then content id)
/// 4. Build the augmented target URL and issue `302 Found`
///
/// Every miss falls through to `404 Not Found`: the service has no other
/// routing to hand the request to, and a plain 404 is the standalone
/// equivalent of letting the host platform continue.
///
/// The redirect response carries only the `Location` header, nothing else.
pub async fn intercept_handler(State(state): State<AppState>, uri: Uri) -> Response {
    match state.redirect_service.intercept(uri.path()).await {
        InterceptOutcome::Redirect(decision) => {
            info!(
                link_id = decision.link_id,
                software = %decision.software,
                location = %decision.location,
                "redirecting"
            );
            (
                StatusCode::FOUND,
                [(header::LOCATION, decision.location)],
            )
                .into_response()
        }
        InterceptOutcome::Fallthrough(reason) => {
            debug!(path = %uri.path(), ?reason, "no redirect");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
