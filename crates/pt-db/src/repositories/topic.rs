use std::collections::HashMap;

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::models::{Subtopic, SubtopicRow, Topic, TopicRow};

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<TopicRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, created_at
            FROM topics
            ORDER BY name
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get<'e, E>(executor: E, topic_id: Uuid) -> Result<Option<TopicRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, created_at
            FROM topics
            WHERE id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_subtopics<'e, E>(
    executor: E,
    topic_id: Uuid,
) -> Result<Vec<SubtopicRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT topic_id, position, name, practice_link, video_link, article_link, level
            FROM subtopics
            WHERE topic_id = $1
            ORDER BY position
        "#,
    )
    .bind(topic_id)
    .fetch_all(executor)
    .await
}

/// Fetch every subtopic in the catalog in one query, ordered so that rows
/// for the same topic are contiguous and in position order.
pub async fn list_all_subtopics<'e, E>(executor: E) -> Result<Vec<SubtopicRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT topic_id, position, name, practice_link, video_link, article_link, level
            FROM subtopics
            ORDER BY topic_id, position
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Load the whole catalog with subtopics inlined, sorted by topic name.
///
/// Two queries instead of N+1; subtopic rows arrive grouped by topic and in
/// position order, so grouping preserves the sequence.
pub async fn list_with_subtopics(pool: &PgPool) -> Result<Vec<Topic>, sqlx::Error> {
    let rows = list_all(pool).await?;

    let mut subtopics_by_topic: HashMap<Uuid, Vec<SubtopicRow>> = HashMap::new();
    for subtopic in list_all_subtopics(pool).await? {
        subtopics_by_topic
            .entry(subtopic.topic_id)
            .or_default()
            .push(subtopic);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let subtopics = subtopics_by_topic.remove(&row.id).unwrap_or_default();
            Topic::assemble(row, subtopics)
        })
        .collect())
}

/// Number of subtopics a topic holds; the valid progress index range is
/// `[0, count)`.
pub async fn subtopic_count<'e, E>(executor: E, topic_id: Uuid) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*)
            FROM subtopics
            WHERE topic_id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, name: &str) -> Result<TopicRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO topics (name)
            VALUES ($1)
            RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn insert_subtopic<'e, E>(
    executor: E,
    topic_id: Uuid,
    position: i32,
    subtopic: &Subtopic,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO subtopics (topic_id, position, name, practice_link, video_link, article_link, level)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(topic_id)
    .bind(position)
    .bind(&subtopic.name)
    .bind(&subtopic.practice_link)
    .bind(&subtopic.video_link)
    .bind(&subtopic.article_link)
    .bind(subtopic.level)
    .execute(executor)
    .await?;
    Ok(())
}

/// Clear the whole catalog (cascades to subtopics). Used by the seeder.
pub async fn delete_all<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM topics
        "#,
    )
    .execute(executor)
    .await?;
    Ok(())
}
