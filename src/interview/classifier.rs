// src/interview/classifier.rs
// Follow-up classifier: fixed lookback of 2 over interviewer turn metadata.

use crate::store::messages::Message;

/// How many recent interviewer messages the turn flow hands to the classifier.
pub const CLASSIFIER_LOOKBACK: usize = 3;

/// Returns true when a new topic must be forced: the two most recent
/// interviewer messages both carried `follow_up_intent = true`, meaning two
/// consecutive follow-ups already happened. With fewer than two prior
/// interviewer messages the answer is always false (early turns default to
/// encouraging follow-up). Messages without a structured payload count as
/// `follow_up_intent = false`.
///
/// `recent_interviewer_messages` is newest first.
pub fn must_force_new_topic(recent_interviewer_messages: &[Message]) -> bool {
    if recent_interviewer_messages.len() < 2 {
        return false;
    }
    recent_interviewer_messages[..2]
        .iter()
        .all(|m| m.structured_response.as_ref().is_some_and(|s| s.follow_up_intent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::structured::{Evaluation, StructuredResponse};
    use crate::persona::PersonaId;
    use crate::store::messages::{Message, MessageRole};
    use chrono::Utc;

    fn interviewer_msg(follow_up_intent: Option<bool>) -> Message {
        Message {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: "s1".to_string(),
            role: MessageRole::Interviewer,
            interviewer_id: Some(PersonaId::HiringManager),
            content: "question".to_string(),
            structured_response: follow_up_intent.map(|intent| StructuredResponse {
                question: "question".to_string(),
                evaluation: Evaluation {
                    relevance: 70.0,
                    clarity: 70.0,
                    depth: 70.0,
                },
                inner_thought: None,
                follow_up_intent: intent,
                suggested_follow_up: None,
            }),
            audio_url: None,
            latency_ms: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn forces_only_after_two_consecutive_follow_ups() {
        let history = vec![interviewer_msg(Some(true)), interviewer_msg(Some(true))];
        assert!(must_force_new_topic(&history));

        let history = vec![interviewer_msg(Some(true)), interviewer_msg(Some(false))];
        assert!(!must_force_new_topic(&history));

        let history = vec![interviewer_msg(Some(false)), interviewer_msg(Some(true))];
        assert!(!must_force_new_topic(&history));
    }

    #[test]
    fn insufficient_history_never_forces() {
        assert!(!must_force_new_topic(&[]));
        assert!(!must_force_new_topic(&[interviewer_msg(Some(true))]));
    }

    #[test]
    fn lookback_is_exactly_two() {
        // Older follow-ups beyond the two most recent messages are ignored.
        let history = vec![
            interviewer_msg(Some(true)),
            interviewer_msg(Some(false)),
            interviewer_msg(Some(true)),
        ];
        assert!(!must_force_new_topic(&history));
    }

    #[test]
    fn missing_payload_counts_as_no_intent() {
        let history = vec![interviewer_msg(None), interviewer_msg(Some(true))];
        assert!(!must_force_new_topic(&history));
    }
}
