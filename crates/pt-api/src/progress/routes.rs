use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use pt_db::models::ProgressEntry;
use pt_db::repositories::{progress, topic};
use pt_stats::{ActivityItem, LevelBreakdown};

use crate::{ApiState, auth::AuthUser, error::ApiError};

const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
const MAX_ACTIVITY_LIMIT: i64 = 50;

/// Create the progress routes. Every route requires authentication.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/progress", get(list_completed).post(update_progress))
        .route("/progress/stats", get(level_stats))
        .route("/progress/recent", get(recent_activity))
}

#[derive(Debug, Deserialize)]
struct UpdateProgressRequest {
    topic_id: Uuid,
    subtopic_index: i32,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct RecentActivityParams {
    limit: Option<i64>,
}

/// The caller's completed entries, in insertion order.
async fn list_completed(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<ProgressEntry>>, ApiError> {
    let entries = progress::list_completed(&state.pool, auth_user.user_id).await?;
    Ok(Json(entries))
}

/// Toggle one subtopic's completion state.
///
/// Validates the reference before writing: the topic must exist and the
/// index must fall inside its subtopic sequence. The write itself is a
/// single atomic upsert keyed on (user, topic, index).
async fn update_progress(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<UpdateProgressRequest>,
) -> Result<Json<ProgressEntry>, ApiError> {
    let topic_row = topic::get(&state.pool, payload.topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    let subtopic_count = topic::subtopic_count(&state.pool, topic_row.id).await?;
    if payload.subtopic_index < 0 || i64::from(payload.subtopic_index) >= subtopic_count {
        return Err(ApiError::InvalidArgument(
            "Invalid subtopic index".to_string(),
        ));
    }

    let entry = progress::upsert(
        &state.pool,
        auth_user.user_id,
        payload.topic_id,
        payload.subtopic_index,
        payload.completed,
    )
    .await?;

    Ok(Json(entry))
}

/// Per-level completion statistics across the whole catalog.
async fn level_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<LevelBreakdown>, ApiError> {
    let catalog = topic::list_all_subtopics(&state.pool).await?;
    let entries = progress::list_completed(&state.pool, auth_user.user_id).await?;

    let completed = pt_stats::build_completed_set(&entries);
    Ok(Json(pt_stats::compute_level_stats(&catalog, &completed)))
}

/// The caller's most recent completions, newest first.
///
/// Entries whose topic has since been deleted (or whose index no longer
/// resolves) come back with fallback labels rather than failing the batch.
async fn recent_activity(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(params): Query<RecentActivityParams>,
) -> Result<Json<Vec<ActivityItem>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT);

    let entries = progress::list_recent_completed(&state.pool, auth_user.user_id, limit).await?;
    let topics = pt_stats::topic_map(topic::list_with_subtopics(&state.pool).await?);

    Ok(Json(pt_stats::recent_activity(&entries, &topics)))
}
