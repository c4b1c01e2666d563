// src/llm/client.rs

//! Raw OpenAI chat-completions client. No SDK wrapper; reqwest and JSON.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::CONFIG;
use crate::llm::schema::{interview_response_schema, keyword_extraction_schema};
use crate::llm::structured::parse_structured;
use crate::llm::{ChatMessage, ExtractedKeywords, GenerateRequest, LlmResponse, ResponseGenerator};
use crate::store::keywords::{KeywordCategory, UserKeyword};

use super::prompt::build_system_prompt;

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiClient {
    pub fn new() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(CONFIG.openai_timeout))
            .build()?;
        Ok(Self {
            client,
            api_key,
            api_base: CONFIG.openai_base_url.clone(),
            model: CONFIG.model.clone(),
        })
    }

    async fn chat_completion(&self, body: Value) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "OpenAI chat completion failed: {}",
                resp.text().await.unwrap_or_default()
            ));
        }

        let resp_json: Value = resp.json().await?;
        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("No content in OpenAI response"))?;
        Ok(content.to_string())
    }

    fn build_messages(system_prompt: &str, conversation: &[ChatMessage]) -> Vec<Value> {
        let mut messages = vec![json!({"role": "system", "content": system_prompt})];
        messages.extend(
            conversation
                .iter()
                .map(|m| json!({"role": m.role.as_str(), "content": m.content})),
        );
        messages
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<LlmResponse> {
        let started = Instant::now();
        let system_prompt = build_system_prompt(&request);
        let messages = Self::build_messages(&system_prompt, &request.messages);

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": CONFIG.max_response_tokens,
            "temperature": CONFIG.temperature,
        });
        if request.structured {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "interview_response",
                    "strict": true,
                    "schema": interview_response_schema()
                }
            });
        }

        let raw = self.chat_completion(body).await?;
        debug!("OpenAI reply: {} chars", raw.len());

        // Parse failure is a soft-fail: the raw text becomes the question.
        let structured = if request.structured { parse_structured(&raw) } else { None };
        let content = structured
            .as_ref()
            .map(|s| s.question.clone())
            .unwrap_or(raw);

        Ok(LlmResponse {
            content,
            structured,
            model: self.model.clone(),
            latency_ms: started.elapsed().as_millis() as i64,
        })
    }

    async fn extract_keywords(
        &self,
        conversation: &[ChatMessage],
        job_type: &str,
    ) -> Result<ExtractedKeywords> {
        let system_prompt = "You are an interview analyst. Extract durable keywords about the \
            candidate from the conversation: technologies, soft skills, experience, projects, \
            strengths, weaknesses. Only extract what the candidate themselves said, keep keywords \
            concrete, include the context of each mention, and count repeat mentions. Respond as JSON.";

        let transcript = conversation
            .iter()
            .map(|m| format!("[{}]: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n");
        let user_prompt = format!(
            "Position applied for: {job_type}\n\nConversation:\n{transcript}\n\n\
             Extract the key candidate keywords from the answers above."
        );

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "extracted_keywords",
                    "strict": true,
                    "schema": keyword_extraction_schema()
                }
            },
            "max_tokens": CONFIG.keyword_model_tokens,
            "temperature": 0.3,
        });

        let raw = self.chat_completion(body).await?;
        let parsed: Value = serde_json::from_str(&raw)?;

        let keywords = parsed["keywords"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let category = KeywordCategory::parse(item["category"].as_str()?)?;
                        Some(UserKeyword {
                            keyword: item["keyword"].as_str()?.to_string(),
                            category,
                            context: item["context"].as_str().map(String::from),
                            mentioned_count: item["mentioned_count"].as_f64().unwrap_or(1.0) as i64,
                        })
                    })
                    .collect()
            })
            .unwrap_or_else(|| {
                warn!("Keyword extraction reply had no keywords array");
                Vec::new()
            });

        Ok(ExtractedKeywords {
            keywords,
            summary: parsed["summary"].as_str().unwrap_or_default().to_string(),
        })
    }
}
