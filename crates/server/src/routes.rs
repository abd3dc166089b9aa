use std::sync::Arc;

use axum::{routing::get, Json, Router};
use common::types::Health;
use service::records::RecordRepository;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod records;

pub const WELCOME: &str = "Welcome to the Heart Backend API!";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordRepository>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }
}

pub async fn home() -> &'static str {
    WELCOME
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/data", get(records::list_records).post(records::create_record))
        .route(
            "/api/data/:id",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
