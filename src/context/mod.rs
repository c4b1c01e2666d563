// src/context/mod.rs
// Context assembly for one turn: document snippets, keyword memory, and
// question-bank matches. Every external lookup here is best-effort; a failed
// piece degrades to empty instead of failing the turn.

use tracing::warn;

use crate::config::CONFIG;
use crate::interview::session::InterviewSession;
use crate::retrieval::{DocumentRetrieval, QuestionBank, QuestionCategory, QuestionHit, QuestionQuery};
use crate::store::keywords::{KeywordCategory, KeywordStore, UserKeyword};

#[derive(Debug, Clone, Default)]
pub struct AssembledContext {
    /// Labeled resume/portfolio sections, or None when nothing was retrieved.
    pub document_context: Option<String>,
    /// Keyword memory formatted for prompt injection.
    pub keyword_block: Option<String>,
    pub keywords: Vec<UserKeyword>,
    pub questions: Vec<QuestionHit>,
}

/// Maps a job type onto one of the five coarse question-bank categories.
/// Job types without an entry (legal, finance, ...) skip question-bank search
/// entirely.
pub fn map_question_category(job_type: &str) -> Option<QuestionCategory> {
    match job_type {
        "frontend" | "backend" | "fullstack" | "mobile" | "devops" | "data" | "ml" => {
            Some(QuestionCategory::Technical)
        }
        "pm" => Some(QuestionCategory::Behavioral),
        "designer" => Some(QuestionCategory::Situational),
        "sales" | "marketing" => Some(QuestionCategory::Experience),
        "hr" => Some(QuestionCategory::CultureFit),
        _ => None,
    }
}

/// Groups keywords by category under labeled headings, mirroring how they are
/// injected into the system prompt.
pub fn format_keywords(keywords: &[UserKeyword]) -> String {
    let mut result = String::new();
    for category in KeywordCategory::ALL {
        let in_category: Vec<&UserKeyword> =
            keywords.iter().filter(|k| k.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        result.push_str(&format!("\n[{}]\n", category.label()));
        for kw in in_category {
            result.push_str(&format!("- {}", kw.keyword));
            if let Some(context) = &kw.context {
                result.push_str(&format!(" ({context})"));
            }
            if kw.mentioned_count > 1 {
                result.push_str(&format!(" - mentioned {} times", kw.mentioned_count));
            }
            result.push('\n');
        }
    }
    result
}

/// Assembles the full turn context. Lookups run sequentially in a fixed order
/// (resume, portfolio, keyword memory, question search); each one soft-fails
/// independently.
pub async fn assemble(
    retrieval: &dyn DocumentRetrieval,
    question_bank: &dyn QuestionBank,
    keyword_store: &KeywordStore,
    session: &InterviewSession,
    user_text: &str,
) -> AssembledContext {
    let mut sections: Vec<String> = Vec::new();
    let mut resume_snippet = String::new();

    if let Some(doc_id) = &session.resume_doc_id {
        match retrieval.get_context(&session.user_id, user_text, doc_id).await {
            Ok(snippet) if !snippet.is_empty() => {
                resume_snippet = snippet.clone();
                sections.push(format!("[Resume]\n{snippet}"));
            }
            Ok(_) => {}
            Err(e) => warn!("Resume retrieval failed, continuing without it: {e}"),
        }
    }

    if let Some(doc_id) = &session.portfolio_doc_id {
        match retrieval.get_context(&session.user_id, user_text, doc_id).await {
            Ok(snippet) if !snippet.is_empty() => sections.push(format!("[Portfolio]\n{snippet}")),
            Ok(_) => {}
            Err(e) => warn!("Portfolio retrieval failed, continuing without it: {e}"),
        }
    }

    let keywords = match keyword_store
        .top_for_user(&session.user_id, CONFIG.keyword_memory_limit)
        .await
    {
        Ok(keywords) => keywords,
        Err(e) => {
            warn!("Keyword memory load failed, continuing without it: {e}");
            Vec::new()
        }
    };

    let questions = match map_question_category(&session.job_type) {
        Some(category) => {
            let query = QuestionQuery {
                resume_text: resume_snippet,
                job_description: session.job_type.clone(),
                keywords: keywords.iter().map(|k| k.keyword.clone()).collect(),
                category,
                top_k: CONFIG.question_top_k,
                use_reranker: CONFIG.question_use_reranker,
            };
            match question_bank.search(&query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Question bank search failed, continuing without it: {e}");
                    Vec::new()
                }
            }
        }
        None => Vec::new(),
    };

    let keyword_block = if keywords.is_empty() {
        None
    } else {
        Some(format_keywords(&keywords))
    };

    AssembledContext {
        document_context: if sections.is_empty() { None } else { Some(sections.join("\n\n")) },
        keyword_block,
        keywords,
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::session::{Difficulty, SessionStatus};
    use crate::persona::naming::SessionInterviewers;
    use crate::persona::PersonaId;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sqlx::SqlitePool;

    struct ScriptedRetrieval {
        resume: Result<String, String>,
        portfolio: Result<String, String>,
    }

    #[async_trait]
    impl DocumentRetrieval for ScriptedRetrieval {
        async fn get_context(&self, _user_id: &str, _query: &str, doc_id: &str) -> Result<String> {
            let outcome = if doc_id == "resume-doc" { &self.resume } else { &self.portfolio };
            outcome.clone().map_err(|e| anyhow!(e))
        }
    }

    struct EmptyQuestionBank;

    #[async_trait]
    impl QuestionBank for EmptyQuestionBank {
        async fn search(&self, _query: &QuestionQuery) -> Result<Vec<QuestionHit>> {
            Ok(vec![])
        }
    }

    struct FailingQuestionBank;

    #[async_trait]
    impl QuestionBank for FailingQuestionBank {
        async fn search(&self, _query: &QuestionQuery) -> Result<Vec<QuestionHit>> {
            Err(anyhow!("question bank down"))
        }
    }

    fn session(job_type: &str) -> InterviewSession {
        let now = Utc::now();
        InterviewSession {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            job_type: job_type.to_string(),
            industry: "tech".to_string(),
            difficulty: Difficulty::Medium,
            resume_doc_id: Some("resume-doc".to_string()),
            portfolio_doc_id: Some("portfolio-doc".to_string()),
            status: SessionStatus::Active,
            turn_count: 0,
            max_turns: 10,
            current_interviewer: PersonaId::HiringManager,
            interviewers: SessionInterviewers::randomize(&mut StdRng::seed_from_u64(5)),
            created_at: now,
            updated_at: now,
        }
    }

    async fn keyword_store() -> KeywordStore {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::store::init_schema(&pool).await.unwrap();
        KeywordStore::new(pool)
    }

    #[test]
    fn category_map_covers_known_job_types_only() {
        assert_eq!(map_question_category("backend"), Some(QuestionCategory::Technical));
        assert_eq!(map_question_category("pm"), Some(QuestionCategory::Behavioral));
        assert_eq!(map_question_category("hr"), Some(QuestionCategory::CultureFit));
        assert_eq!(map_question_category("legal"), None);
        assert_eq!(map_question_category("finance"), None);
    }

    #[test]
    fn keywords_group_by_category_with_counts() {
        let keywords = vec![
            UserKeyword {
                keyword: "rust".to_string(),
                category: KeywordCategory::Technical,
                context: Some("main language".to_string()),
                mentioned_count: 3,
            },
            UserKeyword {
                keyword: "mentoring".to_string(),
                category: KeywordCategory::SoftSkill,
                context: None,
                mentioned_count: 1,
            },
        ];
        let block = format_keywords(&keywords);
        assert!(block.contains("[Tech stack]"));
        assert!(block.contains("- rust (main language) - mentioned 3 times"));
        assert!(block.contains("[Soft skills]"));
        assert!(block.contains("- mentoring\n"));
        assert!(!block.contains("mentioned 1 times"));
    }

    #[tokio::test]
    async fn failed_resume_keeps_portfolio_section() {
        let retrieval = ScriptedRetrieval {
            resume: Err("retrieval down".to_string()),
            portfolio: Ok("shipped a rendering engine".to_string()),
        };
        let ctx = assemble(&retrieval, &EmptyQuestionBank, &keyword_store().await, &session("backend"), "hello").await;

        let doc = ctx.document_context.unwrap();
        assert!(doc.contains("[Portfolio]"));
        assert!(doc.contains("rendering engine"));
        assert!(!doc.contains("[Resume]"));
    }

    #[tokio::test]
    async fn question_bank_failure_is_non_fatal() {
        let retrieval = ScriptedRetrieval {
            resume: Ok("resume text".to_string()),
            portfolio: Ok(String::new()),
        };
        let ctx = assemble(&retrieval, &FailingQuestionBank, &keyword_store().await, &session("backend"), "hello").await;
        assert!(ctx.questions.is_empty());
        assert!(ctx.document_context.is_some());
    }

    #[tokio::test]
    async fn unmapped_job_type_skips_question_search() {
        let retrieval = ScriptedRetrieval {
            resume: Ok(String::new()),
            portfolio: Ok(String::new()),
        };
        // FailingQuestionBank would surface as a warn if it were called; the
        // unmapped job type must not reach it at all.
        let ctx = assemble(&retrieval, &FailingQuestionBank, &keyword_store().await, &session("legal"), "hello").await;
        assert!(ctx.questions.is_empty());
        assert!(ctx.document_context.is_none());
    }
}
