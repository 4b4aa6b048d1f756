// src/jobs/mod.rs
use serde::{Deserialize, Serialize};

pub mod search_client;

pub use search_client::JobSearchClient;

pub const DEFAULT_SEARCH_TERM: &str = "software developer";

/// Normalized job record; ephemeral, held only for the duration of a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub posted_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchQuery {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub min_salary: Option<u32>,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl JobSearchQuery {
    /// Empty keywords fall back to the default search term and reset the
    /// page to 1; a zero page is clamped to 1.
    pub fn normalized(mut self) -> Self {
        if self.keywords.trim().is_empty() {
            self.keywords = DEFAULT_SEARCH_TERM.to_string();
            self.page = 1;
        }
        if self.page == 0 {
            self.page = 1;
        }
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchResults {
    pub jobs: Vec<JobListing>,
    pub total_count: u64,
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_keywords_use_default_term_and_reset_page() {
        let query = JobSearchQuery {
            keywords: "   ".to_string(),
            location: "Remote".to_string(),
            min_salary: None,
            date_posted: None,
            page: 7,
        }
        .normalized();

        assert_eq!(query.keywords, DEFAULT_SEARCH_TERM);
        assert_eq!(query.page, 1);
        assert_eq!(query.location, "Remote");
    }

    #[test]
    fn non_empty_keywords_keep_page() {
        let query = JobSearchQuery {
            keywords: "rust engineer".to_string(),
            location: String::new(),
            min_salary: None,
            date_posted: None,
            page: 3,
        }
        .normalized();

        assert_eq!(query.keywords, "rust engineer");
        assert_eq!(query.page, 3);
    }

    #[test]
    fn zero_page_is_clamped() {
        let query = JobSearchQuery {
            keywords: "rust".to_string(),
            location: String::new(),
            min_salary: None,
            date_posted: None,
            page: 0,
        }
        .normalized();

        assert_eq!(query.page, 1);
    }

    #[test]
    fn query_deserializes_with_defaults() {
        let query: JobSearchQuery = serde_json::from_str("{}").expect("parse");
        assert_eq!(query.page, 1);
        assert!(query.keywords.is_empty());
    }
}
