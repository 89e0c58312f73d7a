//! Router assembly.
//!
//! [`build_router`] wires the handlers to their routes with CORS and
//! tracing middleware layers.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Podcasts
        .route("/podcast", post(handlers::podcasts::create_podcast))
        .route("/podcasts", get(handlers::podcasts::list_podcasts))
        .route(
            "/podcast/{id}",
            put(handlers::podcasts::update_podcast).delete(handlers::podcasts::delete_podcast),
        )
        // Recipe skill
        .route("/skill", post(handlers::skill::handle_skill_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
