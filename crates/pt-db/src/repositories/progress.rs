use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::ProgressEntry;

/// Atomically create or replace the unique (user, topic, index) record.
///
/// The unique constraint plus the single-statement `ON CONFLICT` upsert is
/// what keeps concurrent toggles for the same key from producing duplicate
/// rows; the last commit wins. `completed_at` is set to the write time when
/// completing and cleared when un-completing.
pub async fn upsert<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
    subtopic_index: i32,
    completed: bool,
) -> Result<ProgressEntry, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO progress (user_id, topic_id, subtopic_index, completed, completed_at)
            VALUES ($1, $2, $3, $4, CASE WHEN $4 THEN NOW() ELSE NULL END)
            ON CONFLICT (user_id, topic_id, subtopic_index)
            DO UPDATE SET
                completed = $4,
                completed_at = CASE WHEN $4 THEN NOW() ELSE NULL END,
                updated_at = NOW()
            RETURNING id, user_id, topic_id, subtopic_index, completed, completed_at, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .bind(subtopic_index)
    .bind(completed)
    .fetch_one(executor)
    .await
}

/// All of a user's completed entries, in insertion order.
pub async fn list_completed<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<ProgressEntry>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, topic_id, subtopic_index, completed, completed_at, created_at, updated_at
            FROM progress
            WHERE user_id = $1 AND completed = TRUE
            ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// The user's most recently completed entries, newest first.
pub async fn list_recent_completed<'e, E>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ProgressEntry>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, topic_id, subtopic_index, completed, completed_at, created_at, updated_at
            FROM progress
            WHERE user_id = $1 AND completed = TRUE
            ORDER BY completed_at DESC
            LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Number of stored rows for one (user, topic, index) key. Only the tests
/// care about this, to assert that failed upserts leave nothing behind.
pub async fn count_for_key<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
    subtopic_index: i32,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*)
            FROM progress
            WHERE user_id = $1 AND topic_id = $2 AND subtopic_index = $3
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .bind(subtopic_index)
    .fetch_one(executor)
    .await
}
