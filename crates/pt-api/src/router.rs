use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{
    auth,
    middleware::rate_limit::{apply_auth_rate_limit, apply_general_rate_limit},
    progress,
    state::ApiState,
    topic,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(topic::routes())
        .merge(apply_general_rate_limit(progress::routes()))
        .merge(apply_auth_rate_limit(auth::routes()))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
