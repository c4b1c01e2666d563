// src/api/types.rs
// Request/response DTOs for the interview API.

use serde::{Deserialize, Serialize};

use crate::interview::session::{InterviewSession, SessionStatus};
use crate::persona::PersonaId;
use crate::store::messages::Message;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub user_id: String,
    pub job_type: String,
    pub industry: Option<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    pub resume_doc_id: Option<String>,
    pub portfolio_doc_id: Option<String>,
    pub max_turns: Option<i64>,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub success: bool,
    pub session: InterviewSession,
    pub first_message: Message,
    pub interviewer: InterviewerView,
}

#[derive(Debug, Deserialize)]
pub struct SubmitMessageRequest {
    pub session_id: String,
    pub content: String,
    pub audio_url: Option<String>,
    #[serde(default)]
    pub timeout_save_only: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitMessageResponse {
    pub success: bool,
    pub user_message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer_response: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<InterviewerView>,
    pub session_status: SessionStatus,
    pub turn_count: i64,
    pub should_end: bool,
}

/// What the client shows for a persona: archetype plus this session's
/// randomized identity.
#[derive(Debug, Serialize)]
pub struct InterviewerView {
    pub id: PersonaId,
    pub name: String,
    pub role: &'static str,
    pub personality: String,
}

impl InterviewerView {
    pub fn for_session(session: &InterviewSession, persona: PersonaId) -> Self {
        let card = session.interviewers.card(persona);
        Self {
            id: persona,
            name: card.name.clone(),
            role: persona.profile().role,
            personality: card.mbti.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session: InterviewSession,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct LifecycleResponse {
    pub success: bool,
    pub session: InterviewSession,
}
