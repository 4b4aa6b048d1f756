// src/ai/analyzer.rs
//! Comprehensive resume analysis.
//!
//! The model is asked for a JSON object; the first brace-delimited substring
//! of its reply is parsed and JSON-parse success is the only validation. Any
//! failure yields the fixed fallback analysis.

use tracing::warn;

use super::{fallbacks, prompts, AnalysisResult, CompletionClient};

pub struct ResumeAnalyzer {
    client: CompletionClient,
}

impl ResumeAnalyzer {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Analyze resume text. This never errors: the fallback analysis stands
    /// in for every failure mode.
    pub async fn analyze_comprehensive(&self, resume_text: &str) -> AnalysisResult {
        let prompt = prompts::analysis_prompt(resume_text);

        match self.client.complete(prompts::ANALYSIS_SYSTEM, &prompt).await {
            Ok(raw) => parse_analysis(&raw).unwrap_or_else(|| {
                warn!("Analysis response was unparseable, using fallback");
                fallbacks::analysis()
            }),
            Err(e) => {
                warn!("Resume analysis failed, using fallback: {}", e);
                fallbacks::analysis()
            }
        }
    }
}

/// First '{' through the last '}' of the reply, or None
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

pub(crate) fn parse_analysis(raw: &str) -> Option<AnalysisResult> {
    let candidate = extract_json_object(raw)?;
    serde_json::from_str(candidate).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_analyzer() -> ResumeAnalyzer {
        let client = CompletionClient::new(
            "http://localhost:0".to_string(),
            String::new(),
            "test-model".to_string(),
        )
        .expect("client");
        ResumeAnalyzer::new(client)
    }

    #[tokio::test]
    async fn unavailable_client_yields_exact_fallback() {
        let analyzer = offline_analyzer();
        let result = analyzer.analyze_comprehensive("some resume text").await;
        assert_eq!(result, fallbacks::analysis());
        assert_eq!(result.overall_score, 75);
        assert_eq!(result.ats_score, 68);
    }

    #[test]
    fn garbage_reply_parses_to_none() {
        assert!(parse_analysis("sorry, I cannot help with that").is_none());
        assert!(parse_analysis("{not json}").is_none());
        assert!(parse_analysis("").is_none());
    }

    #[test]
    fn json_embedded_in_prose_is_extracted() {
        let raw = r#"Sure! Here is your analysis:
            {"overallScore": 88, "atsScore": 80, "contentScore": 85,
             "formatScore": 90, "strengths": ["clear"], "weaknesses": [],
             "sectionFeedback": {"summary": "good"}, "keywordSuggestions": []}
            Let me know if you need anything else."#;

        let result = parse_analysis(raw).expect("analysis");
        assert_eq!(result.overall_score, 88);
        assert_eq!(result.ats_score, 80);
        assert_eq!(result.strengths, vec!["clear"]);
        assert_eq!(
            result.section_feedback.get("summary").map(String::as_str),
            Some("good")
        );
    }

    #[test]
    fn missing_optional_lists_default_to_empty() {
        let raw = r#"{"overallScore": 60, "atsScore": 55, "contentScore": 58, "formatScore": 62}"#;
        let result = parse_analysis(raw).expect("analysis");
        assert!(result.strengths.is_empty());
        assert!(result.section_feedback.is_empty());
    }

    #[test]
    fn missing_scores_fail_the_parse() {
        assert!(parse_analysis(r#"{"overallScore": 60}"#).is_none());
    }

    #[test]
    fn extract_json_object_bounds() {
        assert_eq!(extract_json_object("a {x} b"), Some("{x}"));
        assert_eq!(extract_json_object("} reversed {"), None);
        assert_eq!(extract_json_object("no braces"), None);
    }
}
