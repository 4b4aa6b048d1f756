// src/ai/assistant.rs
//! Chat-based career assistant and single-field rewrites.

use tracing::warn;

use super::{fallbacks, prompts, CompletionClient};

pub struct CareerAssistant {
    client: CompletionClient,
}

impl CareerAssistant {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Answer a chat message. On any failure the reply is a rule-based
    /// string chosen by keyword matching on the input; this never errors.
    pub async fn chat_response(&self, message: &str, context: &str) -> String {
        let prompt = prompts::chat_prompt(message, context);

        match self.client.complete(prompts::CHAT_SYSTEM, &prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat completion failed, using rule-based reply: {}", e);
                fallbacks::chat_reply(message).to_string()
            }
        }
    }

    /// Rewrite a professional summary; the original text passes through
    /// unchanged on failure.
    pub async fn improve_summary(&self, text: &str) -> String {
        match self
            .client
            .complete(prompts::REWRITE_SYSTEM, &prompts::improve_summary_prompt(text))
            .await
        {
            Ok(rewritten) => rewritten.trim().to_string(),
            Err(e) => {
                warn!("Summary rewrite failed, keeping original: {}", e);
                text.to_string()
            }
        }
    }

    /// Rewrite experience bullet text; the original passes through on failure
    pub async fn improve_experience(&self, text: &str) -> String {
        match self
            .client
            .complete(
                prompts::REWRITE_SYSTEM,
                &prompts::improve_experience_prompt(text),
            )
            .await
        {
            Ok(rewritten) => rewritten.trim().to_string(),
            Err(e) => {
                warn!("Experience rewrite failed, keeping original: {}", e);
                text.to_string()
            }
        }
    }

    /// Suggest skills for a job title; a fixed generic list on failure
    pub async fn suggest_skills(&self, job_title: &str) -> Vec<String> {
        match self
            .client
            .complete(
                prompts::JOB_SEARCH_SYSTEM,
                &prompts::suggest_skills_prompt(job_title),
            )
            .await
        {
            Ok(raw) => parse_skill_list(&raw).unwrap_or_else(|| {
                warn!("Skill suggestions were unparseable, using defaults");
                fallbacks::skill_suggestions()
            }),
            Err(e) => {
                warn!("Skill suggestion failed, using defaults: {}", e);
                fallbacks::skill_suggestions()
            }
        }
    }
}

/// Accept either a JSON string array or a plain line/bullet list
fn parse_skill_list(raw: &str) -> Option<Vec<String>> {
    if let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) {
        if start < end {
            if let Ok(skills) = serde_json::from_str::<Vec<String>>(&raw[start..=end]) {
                if !skills.is_empty() {
                    return Some(skills);
                }
            }
        }
    }

    let lines: Vec<String> = raw
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_assistant() -> CareerAssistant {
        let client = CompletionClient::new(
            "http://localhost:0".to_string(),
            String::new(),
            "test-model".to_string(),
        )
        .expect("client");
        CareerAssistant::new(client)
    }

    #[tokio::test]
    async fn chat_falls_back_to_resume_tip() {
        let assistant = offline_assistant();
        let reply = assistant
            .chat_response("How can I improve my resume?", "")
            .await;
        assert_eq!(reply, fallbacks::RESUME_TIP_REPLY);
    }

    #[tokio::test]
    async fn chat_always_returns_one_of_the_fixed_replies() {
        let assistant = offline_assistant();
        let fixed = [
            fallbacks::RESUME_TIP_REPLY,
            fallbacks::INTERVIEW_REPLY,
            fallbacks::JOB_SEARCH_REPLY,
            fallbacks::SKILLS_REPLY,
            fallbacks::GENERAL_CAREER_REPLY,
        ];

        for message in [
            "resume help",
            "interview nerves",
            "job hunting",
            "skill gaps",
            "completely unrelated",
        ] {
            let reply = assistant.chat_response(message, "any context").await;
            assert!(fixed.contains(&reply.as_str()), "unexpected: {}", reply);
        }
    }

    #[tokio::test]
    async fn rewrites_pass_original_through_on_failure() {
        let assistant = offline_assistant();
        assert_eq!(assistant.improve_summary("my summary").await, "my summary");
        assert_eq!(
            assistant.improve_experience("did things").await,
            "did things"
        );
    }

    #[tokio::test]
    async fn skills_fall_back_to_default_list() {
        let assistant = offline_assistant();
        let skills = assistant.suggest_skills("Product Manager").await;
        assert_eq!(skills, fallbacks::skill_suggestions());
    }

    #[test]
    fn parse_skill_list_accepts_json_array() {
        let skills = parse_skill_list(r#"Here you go: ["Rust", "SQL"]"#).expect("skills");
        assert_eq!(skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn parse_skill_list_accepts_bullets() {
        let skills = parse_skill_list("- Rust\n- SQL\n").expect("skills");
        assert_eq!(skills, vec!["Rust", "SQL"]);
        assert!(parse_skill_list("   \n").is_none());
    }
}
