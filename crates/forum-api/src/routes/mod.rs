//! Route definitions
//!
//! Reaction routes are mounted under /api/v1; health probes sit at the root.

use axum::{routing::get, Router};

use crate::handlers::{health, reactions};
use crate::state::AppState;

/// Create the main router with API and health routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts/:post_id/reactions",
            get(reactions::get_post_reactions).post(reactions::react_post),
        )
        .route(
            "/comments/:comment_id/reactions",
            get(reactions::get_comment_reactions).post(reactions::react_comment),
        )
}
