// src/retrieval/mod.rs
// Clients for the document-retrieval service and the question bank. Both sit
// behind traits so the turn flow can be tested without the services.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::config::CONFIG;

/// Fetches a snippet of an uploaded document relevant to a query.
#[async_trait]
pub trait DocumentRetrieval: Send + Sync {
    async fn get_context(&self, user_id: &str, query: &str, doc_id: &str) -> Result<String>;
}

/// The five coarse question-bank categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    Situational,
    Experience,
    CultureFit,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Technical => "technical",
            QuestionCategory::Behavioral => "behavioral",
            QuestionCategory::Situational => "situational",
            QuestionCategory::Experience => "experience",
            QuestionCategory::CultureFit => "culture_fit",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionHit {
    pub question: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct QuestionQuery {
    pub resume_text: String,
    pub job_description: String,
    pub keywords: Vec<String>,
    pub category: QuestionCategory,
    pub top_k: usize,
    pub use_reranker: bool,
}

#[async_trait]
pub trait QuestionBank: Send + Sync {
    async fn search(&self, query: &QuestionQuery) -> Result<Vec<QuestionHit>>;
}

/// HTTP implementation against the hosted retrieval service.
#[derive(Clone)]
pub struct HttpRetrievalClient {
    client: Client,
    base_url: String,
}

impl HttpRetrievalClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CONFIG.retrieval_timeout))
            .build()?;
        Ok(Self { client, base_url: CONFIG.retrieval_base_url.clone() })
    }
}

#[async_trait]
impl DocumentRetrieval for HttpRetrievalClient {
    async fn get_context(&self, user_id: &str, query: &str, doc_id: &str) -> Result<String> {
        let url = format!("{}/context", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({
                "user_id": user_id,
                "query": query,
                "doc_id": doc_id,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "document retrieval failed: {}",
                resp.text().await.unwrap_or_default()
            ));
        }
        let body: serde_json::Value = resp.json().await?;
        Ok(body["context"].as_str().unwrap_or_default().to_string())
    }
}

/// HTTP implementation against the question-bank search service.
#[derive(Clone)]
pub struct HttpQuestionBank {
    client: Client,
    base_url: String,
}

impl HttpQuestionBank {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CONFIG.retrieval_timeout))
            .build()?;
        Ok(Self { client, base_url: CONFIG.question_bank_base_url.clone() })
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn search(&self, query: &QuestionQuery) -> Result<Vec<QuestionHit>> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({
                "resume_text": query.resume_text,
                "job_description": query.job_description,
                "keywords": query.keywords,
                "category": query.category.as_str(),
                "top_k": query.top_k,
                "use_reranker": query.use_reranker,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "question bank search failed: {}",
                resp.text().await.unwrap_or_default()
            ));
        }
        let body: serde_json::Value = resp.json().await?;
        let hits = body["results"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        Some(QuestionHit {
                            question: item["question"].as_str()?.to_string(),
                            score: item["score"].as_f64().unwrap_or(0.0),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(hits)
    }
}
