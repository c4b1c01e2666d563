// src/llm/mod.rs
// LLM-facing types and the generator seam the turn flow talks through.

pub mod client;
pub mod prompt;
pub mod schema;
pub mod structured;

use anyhow::Result;
use async_trait::async_trait;

use crate::interview::session::Difficulty;
use crate::persona::naming::InterviewerCard;
use crate::persona::PersonaId;
use crate::store::keywords::UserKeyword;
use structured::StructuredResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Everything one generation call needs. Context and keyword blocks arrive
/// pre-assembled from the context module.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub messages: Vec<ChatMessage>,
    pub persona: PersonaId,
    pub card: InterviewerCard,
    pub job_type: String,
    pub industry: String,
    pub difficulty: Difficulty,
    pub turn_count: i64,
    pub document_context: Option<String>,
    pub keyword_block: Option<String>,
    pub structured: bool,
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub structured: Option<StructuredResponse>,
    pub model: String,
    pub latency_ms: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedKeywords {
    pub keywords: Vec<UserKeyword>,
    pub summary: String,
}

/// The response generator seam. Production uses the OpenAI client; tests
/// script this trait.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<LlmResponse>;

    /// Extracts durable candidate keywords from a conversation. Called once
    /// per session, after the user's first answer.
    async fn extract_keywords(
        &self,
        conversation: &[ChatMessage],
        job_type: &str,
    ) -> Result<ExtractedKeywords>;
}
