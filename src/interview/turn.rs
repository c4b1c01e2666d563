// src/interview/turn.rs
// The turn controller: everything that happens between receiving a user
// answer and committing the interviewer's reply.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::CONFIG;
use crate::context;
use crate::interview::classifier::{must_force_new_topic, CLASSIFIER_LOOKBACK};
use crate::interview::selector::select_turn;
use crate::interview::session::{Difficulty, InterviewSession, SessionStatus, TransitionError};
use crate::llm::{ChatMessage, GenerateRequest, ResponseGenerator};
use crate::persona::naming::SessionInterviewers;
use crate::persona::PersonaId;
use crate::retrieval::{DocumentRetrieval, QuestionBank};
use crate::store::keywords::KeywordStore;
use crate::store::messages::{Message, MessageRole, MessageStore};
use crate::store::sessions::SessionStore;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("session id and message content are required")]
    MissingInput,
    #[error("session not found")]
    SessionNotFound,
    #[error("interview is not in progress (status: {})", .0.as_str())]
    SessionNotActive(SessionStatus),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("session was advanced by a concurrent submission")]
    StaleSession,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct StartParams {
    pub user_id: String,
    pub job_type: String,
    pub industry: Option<String>,
    pub difficulty: Difficulty,
    pub resume_doc_id: Option<String>,
    pub portfolio_doc_id: Option<String>,
    pub max_turns: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StartOutcome {
    pub session: InterviewSession,
    pub first_message: Message,
}

#[derive(Debug, Clone)]
pub struct SubmitParams {
    pub session_id: String,
    pub content: String,
    pub audio_url: Option<String>,
    /// Caller-signalled timeout: persist the answer and return without
    /// generating a reply or advancing the session.
    pub timeout_save_only: bool,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub user_message: Message,
    pub interviewer_message: Option<Message>,
    pub next_persona: Option<PersonaId>,
    pub session_status: SessionStatus,
    pub turn_count: i64,
    pub should_end: bool,
}

pub struct InterviewService {
    sessions: SessionStore,
    messages: MessageStore,
    keywords: KeywordStore,
    llm: Arc<dyn ResponseGenerator>,
    retrieval: Arc<dyn DocumentRetrieval>,
    question_bank: Arc<dyn QuestionBank>,
}

impl InterviewService {
    pub fn new(
        sessions: SessionStore,
        messages: MessageStore,
        keywords: KeywordStore,
        llm: Arc<dyn ResponseGenerator>,
        retrieval: Arc<dyn DocumentRetrieval>,
        question_bank: Arc<dyn QuestionBank>,
    ) -> Self {
        Self { sessions, messages, keywords, llm, retrieval, question_bank }
    }

    /// Creates a session, randomizes the interviewer cards, and generates the
    /// hiring manager's opening message.
    pub async fn start(&self, params: StartParams) -> Result<StartOutcome, TurnError> {
        if params.user_id.trim().is_empty() || params.job_type.trim().is_empty() {
            return Err(TurnError::MissingInput);
        }

        let now = Utc::now();
        let session = InterviewSession {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: params.user_id,
            job_type: params.job_type,
            industry: params.industry.unwrap_or_else(|| "tech".to_string()),
            difficulty: params.difficulty,
            resume_doc_id: params.resume_doc_id,
            portfolio_doc_id: params.portfolio_doc_id,
            status: SessionStatus::Active,
            turn_count: 0,
            max_turns: params.max_turns.unwrap_or(CONFIG.default_max_turns),
            current_interviewer: PersonaId::HiringManager,
            interviewers: SessionInterviewers::randomize(&mut rand::rng()),
            created_at: now,
            updated_at: now,
        };
        self.sessions.create(&session).await.map_err(TurnError::Internal)?;
        info!("Interview session {} created for job type {}", session.id, session.job_type);

        let ctx = context::assemble(
            self.retrieval.as_ref(),
            self.question_bank.as_ref(),
            &self.keywords,
            &session,
            "self introduction, career summary, project experience and tech stack",
        )
        .await;

        let opener = ChatMessage::user("[Interview start] The candidate has entered.");
        let response = self
            .llm
            .generate(GenerateRequest {
                messages: vec![opener],
                persona: PersonaId::HiringManager,
                card: session.interviewers.hiring_manager.clone(),
                job_type: session.job_type.clone(),
                industry: session.industry.clone(),
                difficulty: session.difficulty,
                turn_count: 0,
                document_context: with_reference_questions(ctx.document_context, &ctx.questions),
                keyword_block: ctx.keyword_block,
                // The greeting has no answer to score.
                structured: false,
            })
            .await
            .map_err(TurnError::Internal)?;

        let first_message = Message::interviewer(
            &session.id,
            PersonaId::HiringManager,
            &response.content,
            None,
            response.latency_ms,
        );
        self.messages.insert(&first_message).await.map_err(TurnError::Internal)?;

        Ok(StartOutcome { session, first_message })
    }

    /// One user turn: classify, select, assemble, generate, persist, advance.
    pub async fn submit_turn(&self, params: SubmitParams) -> Result<TurnOutcome, TurnError> {
        if params.session_id.trim().is_empty() || params.content.trim().is_empty() {
            return Err(TurnError::MissingInput);
        }

        let session = self
            .sessions
            .get(&params.session_id)
            .await
            .map_err(TurnError::Internal)?
            .ok_or(TurnError::SessionNotFound)?;
        if !session.is_active() {
            return Err(TurnError::SessionNotActive(session.status));
        }

        let user_message = Message::user(&session.id, params.content.trim(), params.audio_url);
        self.messages.insert(&user_message).await.map_err(TurnError::Internal)?;

        // Client-side deadline hit: the answer is saved, the session stays
        // mid-turn for the next request to pick up.
        if params.timeout_save_only {
            info!("Timeout save-only for session {}, skipping generation", session.id);
            return Ok(TurnOutcome {
                user_message,
                interviewer_message: None,
                next_persona: None,
                session_status: session.status,
                turn_count: session.turn_count,
                should_end: false,
            });
        }

        // Only history committed before this turn began feeds the decision;
        // the just-written answer is re-appended in memory below.
        let history = self
            .messages
            .history(&session.id, Some(&user_message.id))
            .await
            .map_err(TurnError::Internal)?;

        let recent_interviewer: Vec<Message> = history
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::Interviewer)
            .take(CLASSIFIER_LOOKBACK)
            .cloned()
            .collect();
        let force_new_topic = must_force_new_topic(&recent_interviewer);

        let decision = select_turn(
            session.current_interviewer,
            session.turn_count,
            force_new_topic,
            &mut rand::rng(),
        );
        info!(
            "Turn {} for session {}: {} -> {} (follow_up={}, forced={})",
            session.turn_count,
            session.id,
            session.current_interviewer,
            decision.next_persona,
            decision.is_follow_up,
            decision.forced_new_topic,
        );

        let ctx = context::assemble(
            self.retrieval.as_ref(),
            self.question_bank.as_ref(),
            &self.keywords,
            &session,
            &params.content,
        )
        .await;

        let is_first_user_turn = !history.iter().any(|m| m.role == MessageRole::User);

        let mut conversation: Vec<ChatMessage> = history
            .iter()
            .filter_map(|m| match m.role {
                MessageRole::User => Some(ChatMessage::user(m.content.clone())),
                MessageRole::Interviewer => Some(ChatMessage::assistant(m.content.clone())),
                MessageRole::System => None,
            })
            .collect();
        conversation.push(ChatMessage::user(params.content.trim()));

        let response = self
            .llm
            .generate(GenerateRequest {
                messages: conversation.clone(),
                persona: decision.next_persona,
                card: session.interviewers.card(decision.next_persona).clone(),
                job_type: session.job_type.clone(),
                industry: session.industry.clone(),
                difficulty: session.difficulty,
                turn_count: session.turn_count,
                document_context: with_reference_questions(ctx.document_context, &ctx.questions),
                keyword_block: ctx.keyword_block,
                structured: true,
            })
            .await
            .map_err(TurnError::Internal)?;

        let interviewer_message = Message::interviewer(
            &session.id,
            decision.next_persona,
            &response.content,
            response.structured,
            response.latency_ms,
        );
        self.messages.insert(&interviewer_message).await.map_err(TurnError::Internal)?;

        if is_first_user_turn {
            self.extract_and_store_keywords(&session, &conversation).await;
        }

        let new_turn_count = session.turn_count + 1;
        let should_end = new_turn_count >= session.max_turns;
        let new_status = if should_end {
            session.status.transition(SessionStatus::Completed)?
        } else {
            session.status
        };

        let applied = self
            .sessions
            .advance_turn(&session.id, session.turn_count, decision.next_persona, new_status)
            .await
            .map_err(TurnError::Internal)?;
        if !applied {
            return Err(TurnError::StaleSession);
        }

        Ok(TurnOutcome {
            user_message,
            interviewer_message: Some(interviewer_message),
            next_persona: Some(decision.next_persona),
            session_status: new_status,
            turn_count: new_turn_count,
            should_end,
        })
    }

    pub async fn pause(&self, session_id: &str) -> Result<InterviewSession, TurnError> {
        self.set_lifecycle_status(session_id, SessionStatus::Paused).await
    }

    pub async fn resume(&self, session_id: &str) -> Result<InterviewSession, TurnError> {
        self.set_lifecycle_status(session_id, SessionStatus::Active).await
    }

    pub async fn end(&self, session_id: &str) -> Result<InterviewSession, TurnError> {
        self.set_lifecycle_status(session_id, SessionStatus::Completed).await
    }

    pub async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<(InterviewSession, Vec<Message>), TurnError> {
        let session = self
            .sessions
            .get(session_id)
            .await
            .map_err(TurnError::Internal)?
            .ok_or(TurnError::SessionNotFound)?;
        let messages = self
            .messages
            .history(session_id, None)
            .await
            .map_err(TurnError::Internal)?;
        Ok((session, messages))
    }

    async fn set_lifecycle_status(
        &self,
        session_id: &str,
        target: SessionStatus,
    ) -> Result<InterviewSession, TurnError> {
        let mut session = self
            .sessions
            .get(session_id)
            .await
            .map_err(TurnError::Internal)?
            .ok_or(TurnError::SessionNotFound)?;
        let new_status = session.status.transition(target)?;
        self.sessions
            .set_status(session_id, new_status)
            .await
            .map_err(TurnError::Internal)?;
        session.status = new_status;
        Ok(session)
    }

    /// Post-first-answer keyword extraction. Best effort: failures are logged
    /// and never fail the turn.
    async fn extract_and_store_keywords(
        &self,
        session: &InterviewSession,
        conversation: &[ChatMessage],
    ) {
        let extracted = match self.llm.extract_keywords(conversation, &session.job_type).await {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!("Keyword extraction failed for session {}: {e}", session.id);
                return;
            }
        };
        info!(
            "Extracted {} keywords for user {}",
            extracted.keywords.len(),
            session.user_id
        );
        for keyword in &extracted.keywords {
            if let Err(e) = self.keywords.upsert(&session.user_id, keyword).await {
                warn!("Keyword upsert failed for '{}': {e}", keyword.keyword);
            }
        }
    }
}

/// Folds question-bank hits into the document context as a labeled section.
fn with_reference_questions(
    document_context: Option<String>,
    questions: &[crate::retrieval::QuestionHit],
) -> Option<String> {
    if questions.is_empty() {
        return document_context;
    }
    let list = questions
        .iter()
        .map(|q| format!("- {}", q.question))
        .collect::<Vec<_>>()
        .join("\n");
    let section = format!("[Reference questions for this role]\n{list}");
    Some(match document_context {
        Some(existing) => format!("{existing}\n\n{section}"),
        None => section,
    })
}
