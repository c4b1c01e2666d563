// src/state.rs

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::interview::InterviewService;
use crate::llm::ResponseGenerator;
use crate::retrieval::{DocumentRetrieval, QuestionBank};
use crate::store::keywords::KeywordStore;
use crate::store::messages::MessageStore;
use crate::store::sessions::SessionStore;

/// Shared application state handed to every request handler.
pub struct AppState {
    pub service: InterviewService,
}

/// Wires stores and external clients into the interview service. The schema
/// is created here so tests on `sqlite::memory:` get it for free.
pub async fn create_app_state(
    pool: SqlitePool,
    llm: Arc<dyn ResponseGenerator>,
    retrieval: Arc<dyn DocumentRetrieval>,
    question_bank: Arc<dyn QuestionBank>,
) -> Result<AppState> {
    crate::store::init_schema(&pool).await?;
    let service = InterviewService::new(
        SessionStore::new(pool.clone()),
        MessageStore::new(pool.clone()),
        KeywordStore::new(pool),
        llm,
        retrieval,
        question_bank,
    );
    Ok(AppState { service })
}
