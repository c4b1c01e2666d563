// src/llm/structured.rs
// The schema-constrained interviewer reply, plus parse-with-fallback.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Per-answer scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub relevance: f32,
    pub clarity: f32,
    pub depth: f32,
}

/// Structured payload attached to interviewer messages. Read-only history for
/// the follow-up classifier; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResponse {
    pub question: String,
    pub evaluation: Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_thought: Option<String>,
    pub follow_up_intent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_follow_up: Option<String>,
}

pub fn validate_response(response: &StructuredResponse) -> Result<()> {
    if response.question.trim().is_empty() {
        return Err(anyhow!("question cannot be empty"));
    }
    for (name, score) in [
        ("relevance", response.evaluation.relevance),
        ("clarity", response.evaluation.clarity),
        ("depth", response.evaluation.depth),
    ] {
        if !(0.0..=100.0).contains(&score) {
            return Err(anyhow!("{} score {} outside 0-100", name, score));
        }
    }
    Ok(())
}

/// Parses the raw LLM reply against the structured contract. Any parse or
/// validation failure is a soft-fail: the caller falls back to using the raw
/// text as the question with no evaluation payload.
pub fn parse_structured(raw: &str) -> Option<StructuredResponse> {
    match serde_json::from_str::<StructuredResponse>(raw) {
        Ok(parsed) => match validate_response(&parsed) {
            Ok(()) => Some(parsed),
            Err(e) => {
                warn!("Structured response failed validation, using raw text: {e}");
                None
            }
        },
        Err(e) => {
            warn!("Failed to parse structured response, using raw text: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let raw = r#"{
            "question": "Why did you pick that database?",
            "evaluation": {"relevance": 82, "clarity": 75, "depth": 64},
            "inner_thought": "Solid but generic answer.",
            "follow_up_intent": true,
            "suggested_follow_up": "Ask about failure modes."
        }"#;
        let parsed = parse_structured(raw).unwrap();
        assert!(parsed.follow_up_intent);
        assert_eq!(parsed.evaluation.relevance, 82.0);
        assert_eq!(parsed.suggested_follow_up.as_deref(), Some("Ask about failure modes."));
    }

    #[test]
    fn malformed_json_soft_fails() {
        assert!(parse_structured("Tell me about your last project.").is_none());
        assert!(parse_structured("{\"question\": \"incomplete\"").is_none());
    }

    #[test]
    fn out_of_range_scores_soft_fail() {
        let raw = r#"{
            "question": "q",
            "evaluation": {"relevance": 130, "clarity": 75, "depth": 64},
            "follow_up_intent": false
        }"#;
        assert!(parse_structured(raw).is_none());
    }

    #[test]
    fn empty_question_rejected() {
        let resp = StructuredResponse {
            question: "   ".to_string(),
            evaluation: Evaluation { relevance: 50.0, clarity: 50.0, depth: 50.0 },
            inner_thought: None,
            follow_up_intent: false,
            suggested_follow_up: None,
        };
        assert!(validate_response(&resp).is_err());
    }
}
