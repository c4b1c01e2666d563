// src/interview/session.rs
// InterviewSession as an explicit state object with validated transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persona::naming::SessionInterviewers;
use crate::persona::PersonaId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "entry level (fundamentals)",
            Difficulty::Medium => "mid level (hands-on experience)",
            Difficulty::Hard => "senior level (deep technical)",
        }
    }
}

/// Session lifecycle. Transitions only move forward; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid session transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: SessionStatus,
    pub to: SessionStatus,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Waiting => "waiting",
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(SessionStatus::Waiting),
            "active" => Some(SessionStatus::Active),
            "paused" => Some(SessionStatus::Paused),
            "completed" => Some(SessionStatus::Completed),
            _ => None,
        }
    }

    /// Validates `self -> to`. Allowed: waiting->active, active->paused,
    /// paused->active, active|paused->completed. Everything else is rejected,
    /// including any transition out of `Completed`.
    pub fn transition(self, to: SessionStatus) -> Result<SessionStatus, TransitionError> {
        use SessionStatus::*;
        let ok = matches!(
            (self, to),
            (Waiting, Active) | (Active, Paused) | (Paused, Active) | (Active, Completed) | (Paused, Completed)
        );
        if ok {
            Ok(to)
        } else {
            Err(TransitionError { from: self, to })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub user_id: String,
    pub job_type: String,
    pub industry: String,
    pub difficulty: Difficulty,
    pub resume_doc_id: Option<String>,
    pub portfolio_doc_id: Option<String>,
    pub status: SessionStatus,
    pub turn_count: i64,
    pub max_turns: i64,
    pub current_interviewer: PersonaId,
    pub interviewers: SessionInterviewers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewSession {
    /// Invariant check: turn_count never exceeds max_turns.
    pub fn turns_remaining(&self) -> i64 {
        (self.max_turns - self.turn_count).max(0)
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}
