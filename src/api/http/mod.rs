// src/api/http/mod.rs

pub mod interview;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/interview/start", post(interview::start_interview))
        .route("/interview/message", post(interview::submit_message))
        .route("/interview/{id}", get(interview::get_session))
        .route("/interview/{id}/pause", post(interview::pause_session))
        .route("/interview/{id}/resume", post(interview::resume_session))
        .route("/interview/{id}/end", post(interview::end_session))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
