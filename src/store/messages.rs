// src/store/messages.rs
// Append-only message log, ordered by creation within a session.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::warn;

use crate::llm::structured::StructuredResponse;
use crate::persona::PersonaId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Interviewer,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Interviewer => "interviewer",
            MessageRole::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(MessageRole::User),
            "interviewer" => Some(MessageRole::Interviewer),
            "system" => Some(MessageRole::System),
            _ => None,
        }
    }
}

/// One utterance. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer_id: Option<PersonaId>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_response: Option<StructuredResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(session_id: &str, content: &str, audio_url: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role: MessageRole::User,
            interviewer_id: None,
            content: content.to_string(),
            structured_response: None,
            audio_url,
            latency_ms: None,
            created_at: Utc::now(),
        }
    }

    pub fn interviewer(
        session_id: &str,
        persona: PersonaId,
        content: &str,
        structured_response: Option<StructuredResponse>,
        latency_ms: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role: MessageRole::Interviewer,
            interviewer_id: Some(persona),
            content: content.to_string(),
            structured_response,
            audio_url: None,
            latency_ms: Some(latency_ms),
            created_at: Utc::now(),
        }
    }
}

pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, message: &Message) -> Result<()> {
        let structured = message
            .structured_response
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO messages
                (id, session_id, role, interviewer_id, content, structured_response, audio_url, latency_ms, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.session_id)
        .bind(message.role.as_str())
        .bind(message.interviewer_id.map(|p| p.as_str()))
        .bind(&message.content)
        .bind(structured)
        .bind(&message.audio_url)
        .bind(message.latency_ms)
        .bind(message.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Session history in arrival order, optionally excluding one message by
    /// id. The turn flow excludes the just-written user message so the
    /// persona decision only ever consults history committed before the turn
    /// began.
    pub async fn history(&self, session_id: &str, exclude_id: Option<&str>) -> Result<Vec<Message>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, interviewer_id, content,
                   structured_response, audio_url, latency_ms, created_at
            FROM messages
            WHERE session_id = ? AND id != ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(session_id)
        .bind(exclude_id.unwrap_or(""))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(row_to_message).collect())
    }
}

fn row_to_message(row: sqlx::sqlite::SqliteRow) -> Option<Message> {
    let role = MessageRole::parse(&row.get::<String, _>("role"))?;
    let interviewer_id = row
        .get::<Option<String>, _>("interviewer_id")
        .and_then(|s| PersonaId::from_str(&s).ok());
    let structured_response = row
        .get::<Option<String>, _>("structured_response")
        .and_then(|raw| match serde_json::from_str(&raw) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Dropping unreadable structured payload: {e}");
                None
            }
        });
    let created_at = DateTime::parse_from_rfc3339(&row.get::<String, _>("created_at"))
        .ok()?
        .with_timezone(&Utc);

    Some(Message {
        id: row.get("id"),
        session_id: row.get("session_id"),
        role,
        interviewer_id,
        content: row.get("content"),
        structured_response,
        audio_url: row.get("audio_url"),
        latency_ms: row.get("latency_ms"),
        created_at,
    })
}
