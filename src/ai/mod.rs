// src/ai/mod.rs
//! Generative-text adapters with deterministic local fallbacks.
//!
//! Every operation here swallows upstream failures (missing key, transport
//! error, non-2xx status, malformed payload) and substitutes static content;
//! callers never see an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod analyzer;
pub mod assistant;
pub mod completion_client;
pub mod fallbacks;
pub mod job_search;
pub mod prompts;

pub use analyzer::ResumeAnalyzer;
pub use assistant::CareerAssistant;
pub use completion_client::CompletionClient;
pub use job_search::AiJobSearch;

/// Fixed-shape resume analysis, produced once per upload and consumed by the
/// results page. Field names follow the wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub ats_score: u8,
    pub content_score: u8,
    pub format_score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub section_feedback: BTreeMap<String, String>,
    #[serde(default)]
    pub keyword_suggestions: Vec<String>,
}
