// src/web/handlers/job_handlers.rs
//! Job search endpoints: the listings-API aggregation and the AI suggester

use crate::ai::AiJobSearch;
use crate::auth::AuthenticatedUser;
use crate::jobs::{JobListing, JobSearchClient, JobSearchQuery, JobSearchResults};
use crate::web::types::{
    DataResponse, JobSuggestRequest, StandardErrorResponse, StandardRequest, WithConversationId,
};
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

const DEFAULT_SUGGESTION_LIMIT: usize = 5;
const MAX_SUGGESTION_LIMIT: usize = 20;

pub async fn search_jobs_handler(
    request: Json<StandardRequest<JobSearchQuery>>,
    auth: AuthenticatedUser,
    jobs_client: &State<JobSearchClient>,
) -> Json<DataResponse<JobSearchResults>> {
    let conversation_id = request.conversation_id();

    info!(
        "Job search by {}: '{}' page {}",
        auth.email(),
        request.data.keywords,
        request.data.page
    );

    // The adapter masks upstream failures; this endpoint never errors
    let results = jobs_client.search(&request.data).await;

    Json(DataResponse::success(
        format!("{} jobs found", results.total_count),
        results,
        conversation_id,
    ))
}

pub async fn suggest_jobs_handler(
    request: Json<StandardRequest<JobSuggestRequest>>,
    auth: AuthenticatedUser,
    ai_jobs: &State<AiJobSearch>,
) -> Result<Json<DataResponse<Vec<JobListing>>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let title = request.data.title.trim();

    if title.is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "Job title cannot be empty".to_string(),
            "INVALID_TITLE".to_string(),
            vec!["Provide a job title to get suggestions".to_string()],
            conversation_id,
        )));
    }

    let location = request.data.location.as_deref().unwrap_or("Remote");
    let limit = request
        .data
        .limit
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
        .clamp(1, MAX_SUGGESTION_LIMIT);

    info!("AI job suggestions for {}: '{}'", auth.email(), title);

    let listings = ai_jobs.search(title, location, limit).await;

    Ok(Json(DataResponse::success(
        format!("{} suggestions", listings.len()),
        listings,
        conversation_id,
    )))
}
