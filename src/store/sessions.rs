// src/store/sessions.rs
// Session records. The per-turn advance carries an optimistic guard on
// turn_count so two overlapping submissions for one session cannot both win.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::interview::session::{Difficulty, InterviewSession, SessionStatus};
use crate::persona::naming::SessionInterviewers;
use crate::persona::PersonaId;

pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, session: &InterviewSession) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interview_sessions
                (id, user_id, job_type, industry, difficulty, resume_doc_id, portfolio_doc_id,
                 status, turn_count, max_turns, current_interviewer, interviewers, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.job_type)
        .bind(&session.industry)
        .bind(session.difficulty.as_str())
        .bind(&session.resume_doc_id)
        .bind(&session.portfolio_doc_id)
        .bind(session.status.as_str())
        .bind(session.turn_count)
        .bind(session.max_turns)
        .bind(session.current_interviewer.as_str())
        .bind(serde_json::to_string(&session.interviewers)?)
        .bind(session.created_at.to_rfc3339())
        .bind(session.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<InterviewSession>> {
        let row = sqlx::query("SELECT * FROM interview_sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_session).transpose()
    }

    /// Lifecycle-only status change (pause/resume/end). The caller validates
    /// the transition against the state machine first.
    pub async fn set_status(&self, id: &str, status: SessionStatus) -> Result<()> {
        let res = sqlx::query(
            "UPDATE interview_sessions SET status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(anyhow!("session {id} not found"));
        }
        Ok(())
    }

    /// Advances the session by one turn. Guarded on the turn count read at
    /// the start of the request: a concurrent submission that already
    /// advanced the session makes this a stale write, reported as Ok(false).
    pub async fn advance_turn(
        &self,
        id: &str,
        expected_turn_count: i64,
        next_persona: PersonaId,
        new_status: SessionStatus,
    ) -> Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE interview_sessions
            SET turn_count = turn_count + 1,
                current_interviewer = ?,
                status = ?,
                updated_at = ?
            WHERE id = ? AND turn_count = ? AND status = 'active'
            "#,
        )
        .bind(next_persona.as_str())
        .bind(new_status.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .bind(expected_turn_count)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }
}

fn row_to_session(row: sqlx::sqlite::SqliteRow) -> Result<InterviewSession> {
    let status = SessionStatus::parse(&row.get::<String, _>("status"))
        .ok_or_else(|| anyhow!("unknown session status in store"))?;
    let current_interviewer = PersonaId::from_str(&row.get::<String, _>("current_interviewer"))
        .map_err(|_| anyhow!("unknown persona id in store"))?;
    let interviewers: SessionInterviewers =
        serde_json::from_str(&row.get::<String, _>("interviewers"))?;

    Ok(InterviewSession {
        id: row.get("id"),
        user_id: row.get("user_id"),
        job_type: row.get("job_type"),
        industry: row.get("industry"),
        difficulty: Difficulty::parse(&row.get::<String, _>("difficulty")),
        resume_doc_id: row.get("resume_doc_id"),
        portfolio_doc_id: row.get("portfolio_doc_id"),
        status,
        turn_count: row.get("turn_count"),
        max_turns: row.get("max_turns"),
        current_interviewer,
        interviewers,
        created_at: parse_ts(&row.get::<String, _>("created_at"))?,
        updated_at: parse_ts(&row.get::<String, _>("updated_at"))?,
    })
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
