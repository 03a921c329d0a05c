// src/api/mod.rs

use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::models::AppState;
use crate::services::book_appointment_handler;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/book-appointment", post(book_appointment_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
