// src/jobs/search_client.rs
//! Adapter for the external job-listings API.
//!
//! Upstream failures are masked: the caller always gets a result set, empty
//! at worst, never an error.

use anyhow::{Context, Result};
use scraper::Html;
use serde::Deserialize;
use tracing::{error, info};

use super::{JobListing, JobSearchQuery, JobSearchResults};
use crate::utils::collapse_whitespace;

const SEARCH_ENDPOINT: &str = "/search";
const SNIPPET_MAX_CHARS: usize = 280;

pub struct JobSearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamSearchResponse {
    #[serde(default)]
    data: Vec<UpstreamJob>,
    #[serde(default)]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UpstreamJob {
    job_id: Option<String>,
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_country: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
    job_salary_currency: Option<String>,
    job_apply_link: Option<String>,
    job_description: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
}

impl JobSearchClient {
    pub fn new(base_url: String, api_key: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Run a search against the listings API. Any upstream failure yields an
    /// empty result set for the requested page.
    pub async fn search(&self, query: &JobSearchQuery) -> JobSearchResults {
        let query = query.clone().normalized();

        match self.fetch(&query).await {
            Ok(results) => results,
            Err(e) => {
                error!("Job search failed, returning empty results: {}", e);
                JobSearchResults {
                    jobs: Vec::new(),
                    total_count: 0,
                    page: query.page,
                }
            }
        }
    }

    async fn fetch(&self, query: &JobSearchQuery) -> Result<JobSearchResults> {
        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);

        let search_term = if query.location.trim().is_empty() {
            query.keywords.clone()
        } else {
            format!("{} in {}", query.keywords, query.location)
        };

        info!("Searching jobs: {} (page {})", search_term, query.page);

        let mut request = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .query(&[("query", search_term.as_str())])
            .query(&[("page", query.page.to_string().as_str())]);

        if let Some(date_posted) = &query.date_posted {
            request = request.query(&[("date_posted", date_posted.as_str())]);
        }

        let response = request
            .send()
            .await
            .context("Failed to call job listings API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Job listings API error {}: {}", status, error_text);
        }

        let upstream: UpstreamSearchResponse = response
            .json()
            .await
            .context("Failed to parse job listings response")?;

        let jobs: Vec<JobListing> = upstream
            .data
            .into_iter()
            .filter_map(|job| normalize(job, query.min_salary))
            .collect();

        let total_count = upstream.total_count.unwrap_or(jobs.len() as u64);

        Ok(JobSearchResults {
            jobs,
            total_count,
            page: query.page,
        })
    }
}

/// Map an upstream record into the fixed listing shape. Records with no
/// title or employer are dropped; a minimum-salary filter applies when the
/// upstream record carries salary data.
fn normalize(job: UpstreamJob, min_salary: Option<u32>) -> Option<JobListing> {
    let title = job.job_title.filter(|t| !t.trim().is_empty())?;
    let company = job.employer_name.filter(|c| !c.trim().is_empty())?;

    if let (Some(min), Some(max_salary)) = (min_salary, job.job_max_salary) {
        if max_salary < min as f64 {
            return None;
        }
    }

    let location = match (job.job_city, job.job_country) {
        (Some(city), Some(country)) if !city.is_empty() => format!("{}, {}", city, country),
        (Some(city), _) if !city.is_empty() => city,
        (_, Some(country)) => country,
        _ => String::new(),
    };

    let snippet = job
        .job_description
        .map(|d| clean_snippet(&d))
        .unwrap_or_default();

    Some(JobListing {
        id: job.job_id.unwrap_or_default(),
        title,
        company,
        location,
        salary: format_salary(
            job.job_min_salary,
            job.job_max_salary,
            job.job_salary_currency.as_deref(),
        ),
        link: job.job_apply_link.unwrap_or_default(),
        snippet,
        posted_at: job.job_posted_at_datetime_utc,
    })
}

/// Reduce an HTML-ish description to a plain-text snippet
pub(crate) fn clean_snippet(description: &str) -> String {
    let fragment = Html::parse_fragment(description);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    let collapsed = collapse_whitespace(&text);

    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        return collapsed;
    }

    let truncated: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
    format!("{}…", truncated.trim_end())
}

pub(crate) fn format_salary(
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<&str>,
) -> Option<String> {
    let currency = currency.unwrap_or("USD");
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{:.0} - {:.0} {}", min, max, currency)),
        (Some(min), None) => Some(format!("from {:.0} {}", min, currency)),
        (None, Some(max)) => Some(format!("up to {:.0} {}", max, currency)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_snippet_strips_markup_and_collapses_whitespace() {
        let html = "<div><p>Build  <b>APIs</b></p>\n<ul><li>Rust</li><li>SQL</li></ul></div>";
        assert_eq!(clean_snippet(html), "Build APIs Rust SQL");
    }

    #[test]
    fn clean_snippet_truncates_long_text() {
        let long = "word ".repeat(200);
        let snippet = clean_snippet(&long);
        assert!(snippet.chars().count() <= SNIPPET_MAX_CHARS + 1);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn format_salary_variants() {
        assert_eq!(
            format_salary(Some(90000.0), Some(120000.0), Some("EUR")),
            Some("90000 - 120000 EUR".to_string())
        );
        assert_eq!(
            format_salary(Some(90000.0), None, None),
            Some("from 90000 USD".to_string())
        );
        assert_eq!(
            format_salary(None, Some(120000.0), None),
            Some("up to 120000 USD".to_string())
        );
        assert_eq!(format_salary(None, None, Some("USD")), None);
    }

    #[test]
    fn normalize_drops_records_without_title_or_employer() {
        let job = UpstreamJob {
            job_id: Some("j1".into()),
            job_title: None,
            employer_name: Some("Acme".into()),
            job_city: None,
            job_country: None,
            job_min_salary: None,
            job_max_salary: None,
            job_salary_currency: None,
            job_apply_link: None,
            job_description: None,
            job_posted_at_datetime_utc: None,
        };
        assert!(normalize(job, None).is_none());
    }

    #[test]
    fn normalize_applies_min_salary_filter() {
        let job = UpstreamJob {
            job_id: Some("j2".into()),
            job_title: Some("Engineer".into()),
            employer_name: Some("Acme".into()),
            job_city: Some("Zurich".into()),
            job_country: Some("CH".into()),
            job_min_salary: Some(50000.0),
            job_max_salary: Some(80000.0),
            job_salary_currency: Some("CHF".into()),
            job_apply_link: Some("https://example.com/j2".into()),
            job_description: Some("<p>Do things</p>".into()),
            job_posted_at_datetime_utc: None,
        };
        assert!(normalize(job, Some(100_000)).is_none());
    }

    #[test]
    fn normalize_builds_location_and_snippet() {
        let job = UpstreamJob {
            job_id: Some("j3".into()),
            job_title: Some("Engineer".into()),
            employer_name: Some("Acme".into()),
            job_city: Some("Zurich".into()),
            job_country: Some("CH".into()),
            job_min_salary: None,
            job_max_salary: None,
            job_salary_currency: None,
            job_apply_link: None,
            job_description: Some("<p>Do  things</p>".into()),
            job_posted_at_datetime_utc: Some("2025-06-01T00:00:00Z".into()),
        };

        let listing = normalize(job, None).expect("listing");
        assert_eq!(listing.location, "Zurich, CH");
        assert_eq!(listing.snippet, "Do things");
        assert_eq!(listing.salary, None);
    }
}
