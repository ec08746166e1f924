use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use pt_db::models::Topic;
use pt_db::repositories::topic;

use crate::{ApiState, error::ApiError};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics/{id}", get(get_topic))
}

/// All topics sorted by name, subtopics inlined in position order.
async fn list_topics(State(state): State<ApiState>) -> Result<Json<Vec<Topic>>, ApiError> {
    let topics = topic::list_with_subtopics(&state.pool).await?;
    Ok(Json(topics))
}

async fn get_topic(
    State(state): State<ApiState>,
    Path(topic_id): Path<Uuid>,
) -> Result<Json<Topic>, ApiError> {
    let row = topic::get(&state.pool, topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    let subtopics = topic::list_subtopics(&state.pool, topic_id).await?;

    Ok(Json(Topic::assemble(row, subtopics)))
}
