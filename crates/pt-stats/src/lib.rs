//! Aggregation library for PrepTrack
//!
//! This crate derives the two read models the dashboard consumes from the
//! topic catalog and a user's progress rows: per-level completion statistics
//! and the recent-activity feed. Everything here is pure data shaping; the
//! HTTP layer fetches the rows and hands them over.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use pt_db::models::{Level, ProgressEntry, SubtopicRow, Topic};

/// Label substituted when an activity entry references a topic that no
/// longer exists in the catalog.
pub const UNKNOWN_TOPIC: &str = "Unknown Topic";

/// Label substituted when an activity entry's subtopic index is out of
/// range for the topic it references.
pub const UNKNOWN_SUBTOPIC: &str = "Unknown Subtopic";

/// Completion statistics for one difficulty level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// round(100 * completed / total); 0 when the bucket is empty
    pub percentage: u32,
    /// Completed subtopics in this bucket
    pub completed: u32,
    /// Subtopics in this bucket across the whole catalog
    pub total: u32,
}

/// Per-level completion statistics, one bucket per difficulty level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelBreakdown {
    /// EASY bucket
    pub easy: LevelStats,
    /// MEDIUM bucket
    pub medium: LevelStats,
    /// HARD bucket
    pub hard: LevelStats,
}

impl LevelBreakdown {
    fn bucket_mut(&mut self, level: Level) -> &mut LevelStats {
        match level {
            Level::Easy => &mut self.easy,
            Level::Medium => &mut self.medium,
            Level::Hard => &mut self.hard,
        }
    }

    /// The bucket for a level.
    pub const fn bucket(&self, level: Level) -> &LevelStats {
        match level {
            Level::Easy => &self.easy,
            Level::Medium => &self.medium,
            Level::Hard => &self.hard,
        }
    }
}

/// One row of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    /// Progress entry id
    pub id: Uuid,
    /// Resolved topic name, or [`UNKNOWN_TOPIC`]
    pub topic_name: String,
    /// Resolved subtopic name, or [`UNKNOWN_SUBTOPIC`]
    pub subtopic_name: String,
    /// Resolved level; EASY when the reference is stale
    pub level: Level,
    /// When the item was completed
    pub completed_at: Option<DateTime<Utc>>,
}

/// Rounded completion percentage; 0 when `total` is 0 so an empty bucket
/// never produces NaN for callers.
pub fn percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(completed) * 100.0 / f64::from(total)).round() as u32
}

/// Build the O(1)-membership completion set from a user's progress rows.
///
/// Keys are (topic id, subtopic index) pairs; rows with completed = false
/// are skipped, so the set works on any progress slice.
pub fn build_completed_set(entries: &[ProgressEntry]) -> HashSet<(Uuid, i32)> {
    entries
        .iter()
        .filter(|e| e.completed)
        .map(|e| (e.topic_id, e.subtopic_index))
        .collect()
}

/// Bucket every catalog subtopic by level and count the user's completions
/// in each bucket.
pub fn compute_level_stats(
    catalog: &[SubtopicRow],
    completed: &HashSet<(Uuid, i32)>,
) -> LevelBreakdown {
    let mut breakdown = LevelBreakdown::default();

    for subtopic in catalog {
        let bucket = breakdown.bucket_mut(subtopic.level);
        bucket.total += 1;
        if completed.contains(&(subtopic.topic_id, subtopic.position)) {
            bucket.completed += 1;
        }
    }

    for level in [Level::Easy, Level::Medium, Level::Hard] {
        let bucket = breakdown.bucket_mut(level);
        bucket.percentage = percentage(bucket.completed, bucket.total);
    }

    breakdown
}

/// Index topics by id for activity resolution.
pub fn topic_map(topics: Vec<Topic>) -> HashMap<Uuid, Topic> {
    topics.into_iter().map(|t| (t.id, t)).collect()
}

/// Resolve completed entries into display items.
///
/// The entries must already be sorted newest-first and truncated by the
/// caller. A stale reference (topic deleted, or index out of range after a
/// catalog edit) degrades to fallback labels for that item only; it never
/// fails the batch.
pub fn recent_activity(
    entries: &[ProgressEntry],
    topics: &HashMap<Uuid, Topic>,
) -> Vec<ActivityItem> {
    entries
        .iter()
        .map(|entry| {
            let topic = topics.get(&entry.topic_id);
            let subtopic = topic.and_then(|t| {
                usize::try_from(entry.subtopic_index)
                    .ok()
                    .and_then(|i| t.subtopics.get(i))
            });

            ActivityItem {
                id: entry.id,
                topic_name: topic.map_or_else(|| UNKNOWN_TOPIC.to_string(), |t| t.name.clone()),
                subtopic_name: subtopic
                    .map_or_else(|| UNKNOWN_SUBTOPIC.to_string(), |s| s.name.clone()),
                level: subtopic.map_or(Level::Easy, |s| s.level),
                completed_at: entry.completed_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pt_db::models::Subtopic;

    fn subtopic_row(topic_id: Uuid, position: i32, name: &str, level: Level) -> SubtopicRow {
        SubtopicRow {
            topic_id,
            position,
            name: name.to_string(),
            practice_link: String::new(),
            video_link: String::new(),
            article_link: String::new(),
            level,
        }
    }

    fn completed_entry(topic_id: Uuid, subtopic_index: i32, minute: u32) -> ProgressEntry {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap();
        ProgressEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            topic_id,
            subtopic_index,
            completed: true,
            completed_at: Some(at),
            created_at: at,
            updated_at: at,
        }
    }

    fn topic(id: Uuid, name: &str, subtopics: Vec<(&str, Level)>) -> Topic {
        Topic {
            id,
            name: name.to_string(),
            subtopics: subtopics
                .into_iter()
                .map(|(n, level)| Subtopic {
                    name: n.to_string(),
                    practice_link: String::new(),
                    video_link: String::new(),
                    article_link: String::new(),
                    level,
                })
                .collect(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn percentage_is_zero_for_empty_bucket() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn stats_are_all_zero_for_user_with_no_progress() {
        let topic_id = Uuid::new_v4();
        let catalog = vec![
            subtopic_row(topic_id, 0, "a", Level::Easy),
            subtopic_row(topic_id, 1, "b", Level::Medium),
        ];

        let breakdown = compute_level_stats(&catalog, &HashSet::new());

        for level in [Level::Easy, Level::Medium, Level::Hard] {
            let bucket = breakdown.bucket(level);
            assert_eq!(bucket.completed, 0);
            assert_eq!(bucket.percentage, 0);
            assert!(bucket.percentage <= 100);
        }
        assert_eq!(breakdown.easy.total, 1);
        assert_eq!(breakdown.medium.total, 1);
        assert_eq!(breakdown.hard.total, 0);
    }

    #[test]
    fn stats_bucket_by_level_and_count_completions() {
        // Catalog with exactly 3 EASY, 2 MEDIUM, 1 HARD; all 3 EASY completed.
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let catalog = vec![
            subtopic_row(t1, 0, "e1", Level::Easy),
            subtopic_row(t1, 1, "m1", Level::Medium),
            subtopic_row(t1, 2, "e2", Level::Easy),
            subtopic_row(t2, 0, "e3", Level::Easy),
            subtopic_row(t2, 1, "m2", Level::Medium),
            subtopic_row(t2, 2, "h1", Level::Hard),
        ];
        let entries = vec![
            completed_entry(t1, 0, 1),
            completed_entry(t1, 2, 2),
            completed_entry(t2, 0, 3),
        ];

        let completed = build_completed_set(&entries);
        let breakdown = compute_level_stats(&catalog, &completed);

        assert_eq!(
            breakdown.easy,
            LevelStats {
                percentage: 100,
                completed: 3,
                total: 3
            }
        );
        assert_eq!(
            breakdown.medium,
            LevelStats {
                percentage: 0,
                completed: 0,
                total: 2
            }
        );
        assert_eq!(
            breakdown.hard,
            LevelStats {
                percentage: 0,
                completed: 0,
                total: 1
            }
        );
    }

    #[test]
    fn completed_set_skips_uncompleted_rows() {
        let topic_id = Uuid::new_v4();
        let mut entry = completed_entry(topic_id, 0, 1);
        entry.completed = false;
        entry.completed_at = None;

        let set = build_completed_set(&[entry, completed_entry(topic_id, 1, 2)]);

        assert!(!set.contains(&(topic_id, 0)));
        assert!(set.contains(&(topic_id, 1)));
    }

    #[test]
    fn activity_resolves_names_and_levels() {
        let topic_id = Uuid::new_v4();
        let topics = topic_map(vec![topic(
            topic_id,
            "Algorithms",
            vec![("Sorting", Level::Easy), ("Backtracking", Level::Hard)],
        )]);
        let entries = vec![completed_entry(topic_id, 1, 5)];

        let items = recent_activity(&entries, &topics);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].topic_name, "Algorithms");
        assert_eq!(items[0].subtopic_name, "Backtracking");
        assert_eq!(items[0].level, Level::Hard);
        assert_eq!(items[0].completed_at, entries[0].completed_at);
    }

    #[test]
    fn activity_preserves_input_order() {
        let topic_id = Uuid::new_v4();
        let topics = topic_map(vec![topic(
            topic_id,
            "Algorithms",
            vec![("a", Level::Easy), ("b", Level::Easy), ("c", Level::Easy)],
        )]);
        let entries = vec![
            completed_entry(topic_id, 2, 9),
            completed_entry(topic_id, 0, 5),
            completed_entry(topic_id, 1, 1),
        ];

        let items = recent_activity(&entries, &topics);

        let names: Vec<_> = items.iter().map(|i| i.subtopic_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn activity_falls_back_when_topic_is_gone() {
        // The entry references a topic that is no longer in the catalog;
        // the item must still come back, with fallback labels.
        let entries = vec![completed_entry(Uuid::new_v4(), 0, 1)];

        let items = recent_activity(&entries, &HashMap::new());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].topic_name, UNKNOWN_TOPIC);
        assert_eq!(items[0].subtopic_name, UNKNOWN_SUBTOPIC);
        assert_eq!(items[0].level, Level::Easy);
    }

    #[test]
    fn activity_falls_back_when_index_is_out_of_range() {
        let topic_id = Uuid::new_v4();
        let topics = topic_map(vec![topic(
            topic_id,
            "Databases",
            vec![("SQL Basics", Level::Easy)],
        )]);
        // Index 5 was valid before the catalog shrank.
        let entries = vec![completed_entry(topic_id, 5, 1)];

        let items = recent_activity(&entries, &topics);

        assert_eq!(items[0].topic_name, "Databases");
        assert_eq!(items[0].subtopic_name, UNKNOWN_SUBTOPIC);
        assert_eq!(items[0].level, Level::Easy);
    }
}
