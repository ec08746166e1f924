//! One-shot catalog seeder.
//!
//! Connects to `DATABASE_URL`, runs migrations, then replaces the topic
//! catalog with the built-in one. User accounts and progress are untouched.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let database_url = std::env::var("DATABASE_URL")?;

    let pool = pt_db::create_pool(&database_url, 5).await?;
    pt_db::ensure_db_and_migrate(&database_url, &pool).await?;

    pt_db::seed::seed_catalog(&pool).await?;

    let topics = pt_db::seed::catalog();
    let subtopic_count: usize = topics.iter().map(|t| t.subtopics.len()).sum();
    tracing::info!(
        "Catalog seeded: {} topics, {} subtopics",
        topics.len(),
        subtopic_count
    );

    Ok(())
}
