pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth (public)
        .route("/api/register", post(auth::handle_register))
        .route("/api/login", post(auth::handle_login))
        // Content generation (Bearer token required via AuthUser extractor)
        .route("/api/roadmap", post(handlers::handle_roadmap))
        .route("/api/quiz", post(handlers::handle_quiz))
        .route("/api/generate-resource", post(handlers::handle_resources))
        .with_state(state)
}
