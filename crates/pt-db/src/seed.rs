//! Built-in study catalog and the routine that installs it.
//!
//! The catalog is read-mostly: it is written once here and only read by the
//! API afterwards. Re-running the seeder replaces the whole catalog.

use sqlx::PgPool;

use crate::models::{Level, Subtopic};
use crate::repositories::topic;

/// A topic about to be seeded, before it has an id.
#[derive(Debug, Clone)]
pub struct SeedTopic {
    /// Topic name
    pub name: &'static str,
    /// Subtopics in position order
    pub subtopics: Vec<Subtopic>,
}

fn sub(
    name: &str,
    practice_link: &str,
    video_link: &str,
    article_link: &str,
    level: Level,
) -> Subtopic {
    Subtopic {
        name: name.to_string(),
        practice_link: practice_link.to_string(),
        video_link: video_link.to_string(),
        article_link: article_link.to_string(),
        level,
    }
}

/// The default study catalog.
pub fn catalog() -> Vec<SeedTopic> {
    vec![
        SeedTopic {
            name: "Algorithms",
            subtopics: vec![
                sub(
                    "Sorting Algorithms",
                    "https://leetcode.com/problems/sort-an-array/",
                    "https://www.youtube.com/watch?v=pkkFqlG0Hds",
                    "https://www.geeksforgeeks.org/sorting-algorithms/",
                    Level::Easy,
                ),
                sub(
                    "Searching Algorithms",
                    "https://leetcode.com/problems/binary-search/",
                    "https://www.youtube.com/watch?v=P3YID7liBug",
                    "https://www.geeksforgeeks.org/searching-algorithms/",
                    Level::Easy,
                ),
                sub(
                    "Dynamic Programming",
                    "https://leetcode.com/problems/climbing-stairs/",
                    "https://www.youtube.com/watch?v=oBt53YbR9Kk",
                    "https://www.geeksforgeeks.org/dynamic-programming/",
                    Level::Medium,
                ),
                sub(
                    "Greedy Algorithms",
                    "https://leetcode.com/problems/assign-cookies/",
                    "https://www.youtube.com/watch?v=ARvQcqJ_-NY",
                    "https://www.geeksforgeeks.org/greedy-algorithms/",
                    Level::Medium,
                ),
                sub(
                    "Divide and Conquer",
                    "https://leetcode.com/problems/merge-k-sorted-lists/",
                    "https://www.youtube.com/watch?v=EeQ8pwjQxTM",
                    "https://www.geeksforgeeks.org/divide-and-conquer/",
                    Level::Medium,
                ),
                sub(
                    "Backtracking",
                    "https://leetcode.com/problems/n-queens/",
                    "https://www.youtube.com/watch?v=xFv_Hl4B83A",
                    "https://www.geeksforgeeks.org/backtracking-algorithms/",
                    Level::Hard,
                ),
            ],
        },
        SeedTopic {
            name: "Data Structures",
            subtopics: vec![
                sub(
                    "Arrays",
                    "https://leetcode.com/problems/two-sum/",
                    "https://www.youtube.com/watch?v=KLlXCFG5TnA",
                    "https://www.geeksforgeeks.org/array-data-structure/",
                    Level::Easy,
                ),
                sub(
                    "Linked Lists",
                    "https://leetcode.com/problems/reverse-linked-list/",
                    "https://www.youtube.com/watch?v=G0_I-ZF0S38",
                    "https://www.geeksforgeeks.org/data-structures/linked-list/",
                    Level::Easy,
                ),
                sub(
                    "Stacks",
                    "https://leetcode.com/problems/valid-parentheses/",
                    "https://www.youtube.com/watch?v=wjI1WNcIntg",
                    "https://www.geeksforgeeks.org/stack-data-structure/",
                    Level::Easy,
                ),
                sub(
                    "Queues",
                    "https://leetcode.com/problems/implement-queue-using-stacks/",
                    "https://www.youtube.com/watch?v=wjI1WNcIntg",
                    "https://www.geeksforgeeks.org/queue-data-structure/",
                    Level::Easy,
                ),
                sub(
                    "Trees",
                    "https://leetcode.com/problems/binary-tree-inorder-traversal/",
                    "https://www.youtube.com/watch?v=fAAZixBzIAI",
                    "https://www.geeksforgeeks.org/binary-tree-data-structure/",
                    Level::Medium,
                ),
                sub(
                    "Graphs",
                    "https://leetcode.com/problems/number-of-islands/",
                    "https://www.youtube.com/watch?v=tWVWeAqZ0WU",
                    "https://www.geeksforgeeks.org/graph-data-structure-and-algorithms/",
                    Level::Medium,
                ),
                sub(
                    "Hash Tables",
                    "https://leetcode.com/problems/design-hashmap/",
                    "https://www.youtube.com/watch?v=shs0KM3wKv8",
                    "https://www.geeksforgeeks.org/hashing-data-structure/",
                    Level::Medium,
                ),
                sub(
                    "Heaps",
                    "https://leetcode.com/problems/kth-largest-element-in-an-array/",
                    "https://www.youtube.com/watch?v=t0Cq6tVNRBA",
                    "https://www.geeksforgeeks.org/heap-data-structure/",
                    Level::Hard,
                ),
            ],
        },
        SeedTopic {
            name: "Databases",
            subtopics: vec![
                sub(
                    "SQL Basics",
                    "https://leetcode.com/problems/combine-two-tables/",
                    "https://www.youtube.com/watch?v=HXV3zeQKqGY",
                    "https://www.w3schools.com/sql/",
                    Level::Easy,
                ),
                sub(
                    "Joins",
                    "https://leetcode.com/problems/employees-earning-more-than-their-managers/",
                    "https://www.youtube.com/watch?v=9yeOJ0ZMgt0",
                    "https://www.geeksforgeeks.org/sql-join-set-1-inner-left-right-and-full-joins/",
                    Level::Medium,
                ),
                sub(
                    "Indexing",
                    "https://leetcode.com/problems/second-highest-salary/",
                    "https://www.youtube.com/watch?v=-qNSXK7It44",
                    "https://www.geeksforgeeks.org/indexing-in-databases-set-1/",
                    Level::Medium,
                ),
                sub(
                    "Normalization",
                    "https://leetcode.com/problems/duplicate-emails/",
                    "https://www.youtube.com/watch?v=UrYLYV7WSHM",
                    "https://www.geeksforgeeks.org/normal-forms-in-dbms/",
                    Level::Medium,
                ),
                sub(
                    "Transactions",
                    "https://leetcode.com/problems/delete-duplicate-emails/",
                    "https://www.youtube.com/watch?v=P80Js_qClUE",
                    "https://www.geeksforgeeks.org/transaction-in-dbms/",
                    Level::Hard,
                ),
            ],
        },
        SeedTopic {
            name: "Machine Learning",
            subtopics: vec![
                sub(
                    "Linear Regression",
                    "",
                    "https://www.youtube.com/watch?v=nk2CQITm_eo",
                    "https://www.geeksforgeeks.org/ml-linear-regression/",
                    Level::Easy,
                ),
                sub(
                    "Logistic Regression",
                    "",
                    "https://www.youtube.com/watch?v=yIYKR4sgzI8",
                    "https://www.geeksforgeeks.org/understanding-logistic-regression/",
                    Level::Easy,
                ),
                sub(
                    "Decision Trees",
                    "",
                    "https://www.youtube.com/watch?v=7VeUPuFGJHk",
                    "https://www.geeksforgeeks.org/decision-tree/",
                    Level::Medium,
                ),
                sub(
                    "Neural Networks",
                    "",
                    "https://www.youtube.com/watch?v=aircAruvnKk",
                    "https://www.geeksforgeeks.org/neural-networks-a-beginners-guide/",
                    Level::Hard,
                ),
                sub(
                    "Clustering",
                    "",
                    "https://www.youtube.com/watch?v=4b5d3muPQmA",
                    "https://www.geeksforgeeks.org/clustering-in-machine-learning/",
                    Level::Medium,
                ),
            ],
        },
        SeedTopic {
            name: "Operating Systems",
            subtopics: vec![
                sub(
                    "Process Management",
                    "",
                    "https://www.youtube.com/watch?v=OrM7nZcxXZU",
                    "https://www.geeksforgeeks.org/introduction-of-process-management/",
                    Level::Easy,
                ),
                sub(
                    "Memory Management",
                    "",
                    "https://www.youtube.com/watch?v=qdkxXygc3rE",
                    "https://www.geeksforgeeks.org/memory-management-in-operating-system/",
                    Level::Medium,
                ),
                sub(
                    "File Systems",
                    "",
                    "https://www.youtube.com/watch?v=mzUyMy7Ihk0",
                    "https://www.geeksforgeeks.org/file-systems-in-operating-system/",
                    Level::Medium,
                ),
                sub(
                    "Deadlocks",
                    "",
                    "https://www.youtube.com/watch?v=UVo9mGARkhQ",
                    "https://www.geeksforgeeks.org/introduction-of-deadlock-in-operating-system/",
                    Level::Hard,
                ),
                sub(
                    "CPU Scheduling",
                    "",
                    "https://www.youtube.com/watch?v=Jkmy2YLUbUY",
                    "https://www.geeksforgeeks.org/cpu-scheduling-in-operating-systems/",
                    Level::Medium,
                ),
            ],
        },
    ]
}

/// Replace the catalog with the built-in one, atomically.
pub async fn seed_catalog(pool: &PgPool) -> anyhow::Result<()> {
    let topics = catalog();
    let mut tx = pool.begin().await?;

    topic::delete_all(&mut *tx).await?;

    for seed_topic in &topics {
        let row = topic::insert(&mut *tx, seed_topic.name).await?;
        for (position, subtopic) in seed_topic.subtopics.iter().enumerate() {
            topic::insert_subtopic(&mut *tx, row.id, position as i32, subtopic).await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_unique_topic_names() {
        let topics = catalog();
        let mut names: Vec<_> = topics.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), topics.len());
    }

    #[test]
    fn catalog_topics_are_nonempty() {
        for topic in catalog() {
            assert!(
                !topic.subtopics.is_empty(),
                "topic {} has no subtopics",
                topic.name
            );
        }
    }
}
