// src/store/mod.rs
// SQLite persistence: sessions, messages, durable keyword memory.

pub mod keywords;
pub mod messages;
pub mod sessions;

use anyhow::Result;
use sqlx::SqlitePool;

/// Creates all tables if missing. Called once at startup and by tests that
/// run on `sqlite::memory:`.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            job_type TEXT NOT NULL,
            industry TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            resume_doc_id TEXT,
            portfolio_doc_id TEXT,
            status TEXT NOT NULL,
            turn_count INTEGER NOT NULL DEFAULT 0,
            max_turns INTEGER NOT NULL,
            current_interviewer TEXT NOT NULL,
            interviewers TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id TEXT PRIMARY KEY,
            session_id TEXT NOT NULL,
            role TEXT NOT NULL,
            interviewer_id TEXT,
            content TEXT NOT NULL,
            structured_response TEXT,
            audio_url TEXT,
            latency_ms INTEGER,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_keywords (
            user_id TEXT NOT NULL,
            keyword TEXT NOT NULL,
            category TEXT NOT NULL,
            context TEXT,
            mentioned_count INTEGER NOT NULL DEFAULT 1,
            UNIQUE(user_id, keyword, category)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
