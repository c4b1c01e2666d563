// tests/common/mod.rs
// Shared harness: in-memory database plus scripted LLM/retrieval doubles.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use rehearsal::llm::structured::{Evaluation, StructuredResponse};
use rehearsal::llm::{ChatMessage, ExtractedKeywords, GenerateRequest, LlmResponse, ResponseGenerator};
use rehearsal::retrieval::{DocumentRetrieval, QuestionBank, QuestionHit, QuestionQuery};
use rehearsal::state::{create_app_state, AppState};
use rehearsal::store::keywords::UserKeyword;

/// Scripted generator: every structured reply carries the configured
/// follow-up intent, and extraction returns the configured keywords.
pub struct MockLlm {
    pub follow_up_intent: bool,
    pub keywords: Vec<UserKeyword>,
    pub fail_generation: bool,
}

impl Default for MockLlm {
    fn default() -> Self {
        Self { follow_up_intent: false, keywords: Vec::new(), fail_generation: false }
    }
}

#[async_trait]
impl ResponseGenerator for MockLlm {
    async fn generate(&self, request: GenerateRequest) -> Result<LlmResponse> {
        if self.fail_generation {
            return Err(anyhow!("llm unavailable"));
        }
        let (content, structured) = if request.structured {
            let structured = StructuredResponse {
                question: format!("Tell me more about that, turn {}.", request.turn_count),
                evaluation: Evaluation { relevance: 70.0, clarity: 70.0, depth: 70.0 },
                inner_thought: None,
                follow_up_intent: self.follow_up_intent,
                suggested_follow_up: None,
            };
            (structured.question.clone(), Some(structured))
        } else {
            ("Welcome. Please introduce yourself.".to_string(), None)
        };
        Ok(LlmResponse { content, structured, model: "mock".to_string(), latency_ms: 5 })
    }

    async fn extract_keywords(
        &self,
        _conversation: &[ChatMessage],
        _job_type: &str,
    ) -> Result<ExtractedKeywords> {
        Ok(ExtractedKeywords { keywords: self.keywords.clone(), summary: "mock summary".to_string() })
    }
}

pub struct MockRetrieval;

#[async_trait]
impl DocumentRetrieval for MockRetrieval {
    async fn get_context(&self, _user_id: &str, _query: &str, doc_id: &str) -> Result<String> {
        Ok(format!("snippet from {doc_id}"))
    }
}

pub struct MockQuestionBank;

#[async_trait]
impl QuestionBank for MockQuestionBank {
    async fn search(&self, _query: &QuestionQuery) -> Result<Vec<QuestionHit>> {
        Ok(vec![QuestionHit { question: "Describe a production incident you handled.".to_string(), score: 0.9 }])
    }
}

pub async fn setup(llm: MockLlm) -> (Arc<AppState>, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    let state = create_app_state(
        pool.clone(),
        Arc::new(llm),
        Arc::new(MockRetrieval),
        Arc::new(MockQuestionBank),
    )
    .await
    .expect("app state");
    (Arc::new(state), pool)
}
