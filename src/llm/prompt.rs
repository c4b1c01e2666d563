// src/llm/prompt.rs
// System-prompt assembly: persona template + interview situation + optional
// document and keyword-memory sections + the fixed interviewing directives.

use crate::llm::GenerateRequest;

const CORE_DIRECTIVES: &str = r#"
## Core interviewing directives

### 1. Memory and continuity
- Remember and reference earlier parts of the conversation
- Reuse projects, technologies, and experiences the candidate already named
- Use connecting phrases like "earlier you mentioned..., let me dig into that"

### 2. Follow-up strategy
- Vague answer: ask for a concrete example or a number
- Short answer: invite expansion ("could you walk me through that in more detail?")
- Strong answer: approach from another angle or extend to an adjacent topic
- Technology named: ask why it was chosen and what its trade-offs are

### 3. Evaluation lens
- Specificity: is the answer grounded in real experience
- Reasoning: is the analysis and resolution logical
- Self-awareness: does the candidate describe their own role honestly
- Growth: is there a clear learning direction

### 4. Question form
- One or two sentences, concise
- Stay in character for tone and personality
"#;

pub fn build_system_prompt(request: &GenerateRequest) -> String {
    let profile = request.persona.profile();
    let mut prompt = format!(
        "{}\n\n## Current interview\n- Position: {}\n- Industry: {}\n- Difficulty: {}\n- Turn: {}\n- You are: {} ({}), personality {}",
        profile.system_prompt.trim(),
        request.job_type,
        request.industry,
        request.difficulty.label(),
        request.turn_count + 1,
        request.card.name,
        profile.role,
        request.card.mbti,
    );

    if let Some(context) = request.document_context.as_deref().filter(|c| !c.is_empty()) {
        prompt.push_str(&format!(
            "\n\n## Candidate documents (resume / portfolio)\n{context}\n\n\
             -> Ask about concrete experiences and projects from these documents.\n\
             -> Name the technologies and projects they mention and dig deeper."
        ));
    }

    if let Some(keywords) = request.keyword_block.as_deref().filter(|k| !k.is_empty()) {
        prompt.push_str(&format!(
            "\n\n## Keywords from this candidate's previous interviews\n\
             Topics this candidate has discussed before:\n{keywords}\n\
             -> Revisit covered topics from a new angle or at greater depth.\n\
             -> For stated strengths, ask for real examples.\n\
             -> For stated weaknesses, check what they have done about them."
        ));
    }

    prompt.push_str("\n");
    prompt.push_str(CORE_DIRECTIVES.trim_start());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::session::Difficulty;
    use crate::llm::ChatMessage;
    use crate::persona::naming::InterviewerCard;
    use crate::persona::PersonaId;

    fn request(context: Option<&str>, keywords: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            messages: vec![ChatMessage::user("hello")],
            persona: PersonaId::HiringManager,
            card: InterviewerCard { name: "Quinn Park".to_string(), mbti: "ENTJ".to_string() },
            job_type: "backend".to_string(),
            industry: "fintech".to_string(),
            difficulty: Difficulty::Hard,
            turn_count: 2,
            document_context: context.map(String::from),
            keyword_block: keywords.map(String::from),
            structured: true,
        }
    }

    #[test]
    fn includes_persona_and_situation() {
        let prompt = build_system_prompt(&request(None, None));
        assert!(prompt.contains("engineering team lead"));
        assert!(prompt.contains("Position: backend"));
        assert!(prompt.contains("Quinn Park"));
        assert!(prompt.contains("Turn: 3"));
        assert!(prompt.contains("Core interviewing directives"));
    }

    #[test]
    fn document_and_keyword_sections_are_optional() {
        let bare = build_system_prompt(&request(None, None));
        assert!(!bare.contains("Candidate documents"));
        assert!(!bare.contains("previous interviews"));

        let full = build_system_prompt(&request(Some("[Resume]\nBuilt a payment gateway"), Some("[Tech stack]\n- rust")));
        assert!(full.contains("Built a payment gateway"));
        assert!(full.contains("[Tech stack]"));
    }

    #[test]
    fn empty_context_strings_are_skipped() {
        let prompt = build_system_prompt(&request(Some(""), Some("")));
        assert!(!prompt.contains("Candidate documents"));
    }
}
