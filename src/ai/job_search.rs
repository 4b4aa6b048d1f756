// src/ai/job_search.rs
//! AI-suggested job openings.
//!
//! Results are memoized per `"{title}-{location}-{limit}"` key for the
//! lifetime of the process. The model call races a fixed timeout; timeout,
//! transport failure and unparseable output all fall back to the three
//! hard-coded records.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::warn;

use super::{fallbacks, prompts, CompletionClient};
use crate::jobs::JobListing;

const AI_SEARCH_TIMEOUT_SECS: u64 = 20;

pub struct AiJobSearch {
    client: CompletionClient,
    cache: Mutex<HashMap<String, Vec<JobListing>>>,
}

impl AiJobSearch {
    pub fn new(client: CompletionClient) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Suggest up to `limit` openings for a title/location pair. This never
    /// errors; the fallback records stand in for every failure mode.
    pub async fn search(&self, title: &str, location: &str, limit: usize) -> Vec<JobListing> {
        let key = cache_key(title, location, limit);

        if let Some(hit) = self.cache.lock().await.get(&key) {
            return hit.clone();
        }

        let prompt = prompts::job_search_prompt(title, location, limit);
        let outcome = tokio::time::timeout(
            Duration::from_secs(AI_SEARCH_TIMEOUT_SECS),
            self.client.complete(prompts::JOB_SEARCH_SYSTEM, &prompt),
        )
        .await;

        let listings = match outcome {
            Ok(Ok(raw)) => parse_listings(&raw, limit).unwrap_or_else(|| {
                warn!("AI job search reply was unparseable, using fallback records");
                fallbacks::job_listings(title, location)
            }),
            Ok(Err(e)) => {
                warn!("AI job search failed, using fallback records: {}", e);
                fallbacks::job_listings(title, location)
            }
            Err(_) => {
                warn!(
                    "AI job search timed out after {}s, using fallback records",
                    AI_SEARCH_TIMEOUT_SECS
                );
                fallbacks::job_listings(title, location)
            }
        };

        self.cache.lock().await.insert(key, listings.clone());
        listings
    }
}

fn cache_key(title: &str, location: &str, limit: usize) -> String {
    format!("{}-{}-{}", title, location, limit)
}

/// First '[' through the last ']' of the reply, parsed as a listing array
/// and truncated to the requested limit
pub(crate) fn parse_listings(raw: &str, limit: usize) -> Option<Vec<JobListing>> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if start >= end {
        return None;
    }

    let mut listings: Vec<JobListing> = serde_json::from_str(&raw[start..=end]).ok()?;
    if listings.is_empty() {
        return None;
    }

    listings.truncate(limit);
    Some(listings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_search() -> AiJobSearch {
        let client = CompletionClient::new(
            "http://localhost:0".to_string(),
            String::new(),
            "test-model".to_string(),
        )
        .expect("client");
        AiJobSearch::new(client)
    }

    #[tokio::test]
    async fn unavailable_client_yields_three_fallback_records() {
        let search = offline_search();
        let jobs = search.search("Rust Engineer", "Lyon", 5).await;
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0].location, "Lyon");
    }

    #[tokio::test]
    async fn results_are_memoized_per_key() {
        let search = offline_search();
        let first = search.search("Rust Engineer", "Lyon", 5).await;

        // Prime check: a second identical call must hit the cache
        assert!(search
            .cache
            .lock()
            .await
            .contains_key(&cache_key("Rust Engineer", "Lyon", 5)));

        let second = search.search("Rust Engineer", "Lyon", 5).await;
        assert_eq!(first, second);
    }

    #[test]
    fn parse_listings_extracts_and_truncates() {
        let raw = r#"Here are jobs: [
            {"title": "Dev", "company": "A"},
            {"title": "Dev II", "company": "B"},
            {"title": "Dev III", "company": "C"}
        ] hope that helps"#;

        let listings = parse_listings(raw, 2).expect("listings");
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Dev");
        assert_eq!(listings[1].company, "B");
    }

    #[test]
    fn parse_listings_rejects_junk() {
        assert!(parse_listings("no array here", 5).is_none());
        assert!(parse_listings("[]", 5).is_none());
        assert!(parse_listings("[1, 2, 3]", 5).is_none());
    }
}
