use axum::{extract::FromRef, http::StatusCode, routing::get, Json, Router};
use shared::api::Object;
use tower_http::{
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    services::{ExerciseService, PlanService},
    AppState,
};

pub mod exercises;
pub mod plans;

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The full API with tracing and the request body cap applied
pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    api_router()
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub fn api_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    PlanService: FromRef<S>,
    ExerciseService: FromRef<S>,
{
    Router::new()
        .route(Object::Ping.path(), get(ping))
        .merge(plans::router())
        .merge(exercises::router())
}

pub async fn ping() -> (StatusCode, Json<()>) {
    (StatusCode::OK, Json(()))
}
