use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty classification for a subtopic.
///
/// Stored as TEXT in its canonical uppercase form. Modeling the level as a
/// closed enum rejects out-of-vocabulary values at write time instead of
/// silently dropping them from aggregate totals at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Canonical string form, as stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

/// Topic row as stored in the `topics` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopicRow {
    /// Unique topic identifier
    pub id: Uuid,
    /// Topic name (unique across the catalog)
    pub name: String,
    /// When the topic was seeded
    pub created_at: DateTime<Utc>,
}

/// Subtopic row as stored in the `subtopics` table
///
/// Identity is (`topic_id`, `position`); progress rows reference the
/// position, so the column order within a topic is load-bearing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubtopicRow {
    /// Owning topic
    pub topic_id: Uuid,
    /// Zero-based position within the topic's subtopic sequence
    pub position: i32,
    /// Subtopic name
    pub name: String,
    /// Practice problem link (empty when none)
    pub practice_link: String,
    /// Video walkthrough link (empty when none)
    pub video_link: String,
    /// Reference article link (empty when none)
    pub article_link: String,
    /// Difficulty level
    pub level: Level,
}

/// A subtopic as exposed over the API and consumed by the seeder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtopic {
    /// Subtopic name
    pub name: String,
    /// Practice problem link
    #[serde(default)]
    pub practice_link: String,
    /// Video walkthrough link
    #[serde(default)]
    pub video_link: String,
    /// Reference article link
    #[serde(default)]
    pub article_link: String,
    /// Difficulty level
    pub level: Level,
}

impl From<SubtopicRow> for Subtopic {
    fn from(row: SubtopicRow) -> Self {
        Self {
            name: row.name,
            practice_link: row.practice_link,
            video_link: row.video_link,
            article_link: row.article_link,
            level: row.level,
        }
    }
}

/// A topic with its subtopics inlined in position order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic identifier
    pub id: Uuid,
    /// Topic name
    pub name: String,
    /// Subtopics in position order
    pub subtopics: Vec<Subtopic>,
    /// When the topic was seeded
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// Assemble a topic from its row and subtopic rows.
    ///
    /// The rows must already be ordered by position.
    pub fn assemble(row: TopicRow, subtopics: Vec<SubtopicRow>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            subtopics: subtopics.into_iter().map(Subtopic::from).collect(),
            created_at: row.created_at,
        }
    }
}

/// One user's completion record for one subtopic
///
/// At most one row exists per (`user_id`, `topic_id`, `subtopic_index`),
/// enforced by a unique constraint. Rows are never deleted; un-completing
/// flips `completed` back to false and clears `completed_at`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Referenced topic (may no longer exist in the catalog)
    pub topic_id: Uuid,
    /// Position of the subtopic within the referenced topic
    pub subtopic_index: i32,
    /// Completion flag
    pub completed: bool,
    /// When the subtopic was completed (None while not completed)
    pub completed_at: Option<DateTime<Utc>>,
    /// When this record was first created
    pub created_at: DateTime<Utc>,
    /// When this record was last written
    pub updated_at: DateTime<Utc>,
}

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique email address
    pub email: String,
    /// Display name
    pub username: String,
    /// Bcrypt password hash
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}
