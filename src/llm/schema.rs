// src/llm/schema.rs
// Strict JSON schemas sent with response_format: json_schema requests.

use serde_json::{json, Value};

/// Schema for one interviewer turn: the question, scores for the answer just
/// given, and the follow-up intent consumed by the classifier on later turns.
pub fn interview_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "question": {
                "type": "string",
                "description": "The interviewer's next question or reply"
            },
            "evaluation": {
                "type": "object",
                "properties": {
                    "relevance": { "type": "number", "description": "Answer relevance (0-100)" },
                    "clarity": { "type": "number", "description": "Answer clarity (0-100)" },
                    "depth": { "type": "number", "description": "Answer depth (0-100)" }
                },
                "required": ["relevance", "clarity", "depth"],
                "additionalProperties": false
            },
            "inner_thought": {
                "type": "string",
                "description": "The interviewer's private read on the answer, 1-2 sentences"
            },
            "follow_up_intent": {
                "type": "boolean",
                "description": "Whether this turn intends to keep probing the same topic"
            },
            "suggested_follow_up": {
                "type": "string",
                "description": "A candidate next follow-up question"
            }
        },
        "required": ["question", "evaluation", "follow_up_intent"],
        "additionalProperties": false
    })
}

/// Schema for post-first-answer keyword extraction.
pub fn keyword_extraction_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "keywords": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "keyword": { "type": "string", "description": "The keyword itself" },
                        "category": {
                            "type": "string",
                            "enum": ["technical", "soft_skill", "experience", "project", "strength", "weakness"],
                            "description": "Keyword category"
                        },
                        "context": { "type": "string", "description": "Where and how it was mentioned" },
                        "mentioned_count": { "type": "number", "description": "Times mentioned" }
                    },
                    "required": ["keyword", "category", "mentioned_count"],
                    "additionalProperties": false
                }
            },
            "summary": { "type": "string", "description": "Candidate summary, 2-3 sentences" }
        },
        "required": ["keywords", "summary"],
        "additionalProperties": false
    })
}
