// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::ai::{AiJobSearch, CareerAssistant, CompletionClient, ResumeAnalyzer};
use crate::auth::{AuthConfig, AuthenticatedUser, OptionalAuth};
use crate::core::database::DatabaseConfig;
use crate::core::store::ChatMessage;
use crate::core::{ConfigManager, DocumentStore};
use crate::editor::Resume;
use crate::jobs::{JobListing, JobSearchClient, JobSearchQuery, JobSearchResults};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// ===== Chat =====

#[post("/chat", data = "<request>")]
pub async fn chat(
    request: Json<StandardRequest<ChatRequest>>,
    auth: AuthenticatedUser,
    assistant: &State<CareerAssistant>,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<ChatReply>>, Json<StandardErrorResponse>> {
    handlers::chat_handler(request, auth, assistant, store).await
}

#[get("/chat/history")]
pub async fn chat_history(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Vec<ChatMessage>>>, Json<StandardErrorResponse>> {
    handlers::chat_history_handler(auth, store).await
}

// ===== Analysis =====

#[post("/resume/analyze", data = "<upload>")]
pub async fn analyze_resume(
    upload: Form<ResumeUploadForm<'_>>,
    auth: AuthenticatedUser,
    analyzer: &State<ResumeAnalyzer>,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<crate::ai::AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::analyze_resume_handler(upload, auth, analyzer, store).await
}

#[get("/analysis/latest")]
pub async fn latest_analysis(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<crate::ai::AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::latest_analysis_handler(auth, store).await
}

// ===== Jobs =====

#[post("/jobs/search", data = "<request>")]
pub async fn search_jobs(
    request: Json<StandardRequest<JobSearchQuery>>,
    auth: AuthenticatedUser,
    jobs_client: &State<JobSearchClient>,
) -> Json<DataResponse<JobSearchResults>> {
    handlers::search_jobs_handler(request, auth, jobs_client).await
}

#[post("/jobs/suggest", data = "<request>")]
pub async fn suggest_jobs(
    request: Json<StandardRequest<JobSuggestRequest>>,
    auth: AuthenticatedUser,
    ai_jobs: &State<AiJobSearch>,
) -> Result<Json<DataResponse<Vec<JobListing>>>, Json<StandardErrorResponse>> {
    handlers::suggest_jobs_handler(request, auth, ai_jobs).await
}

// ===== Profile =====

#[get("/profile")]
pub async fn get_profile(auth: AuthenticatedUser) -> Json<DataResponse<ProfileData>> {
    handlers::get_profile_handler(auth).await
}

#[post("/profile/update", data = "<request>")]
pub async fn update_profile(
    request: Json<StandardRequest<crate::core::database::ProfileUpdate>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::update_profile_handler(request, auth, db_config).await
}

#[post("/profile/avatar", data = "<upload>")]
pub async fn upload_avatar(
    upload: Form<AvatarUploadForm<'_>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<AvatarInfo>>, Json<StandardErrorResponse>> {
    handlers::upload_avatar_handler(upload, auth, store).await
}

#[get("/profile/avatar")]
pub async fn get_avatar(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<NamedFile, Json<StandardErrorResponse>> {
    handlers::get_avatar_handler(auth, store).await
}

// ===== Resumes =====

#[get("/resumes")]
pub async fn list_resumes(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Vec<Resume>>>, Json<StandardErrorResponse>> {
    handlers::list_resumes_handler(auth, store).await
}

#[get("/resumes/<id>")]
pub async fn get_resume(
    id: String,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Resume>>, Json<StandardErrorResponse>> {
    handlers::get_resume_handler(id, auth, store).await
}

#[post("/resumes/create", data = "<request>")]
pub async fn create_resume(
    request: Json<StandardRequest<CreateResumeRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Resume>>, Json<StandardErrorResponse>> {
    handlers::create_resume_handler(request, auth, store).await
}

#[post("/resumes/save", data = "<request>")]
pub async fn save_resume(
    request: Json<StandardRequest<SaveResumeRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::save_resume_handler(request, auth, store).await
}

#[post("/resumes/delete", data = "<request>")]
pub async fn delete_resume(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_resume_handler(request, auth, store).await
}

#[post("/resumes/favorite", data = "<request>")]
pub async fn favorite_resume(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::favorite_resume_handler(request, auth, store).await
}

#[post("/resumes/record-view", data = "<request>")]
pub async fn record_view(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::record_view_handler(request, auth, store).await
}

#[post("/resumes/record-download", data = "<request>")]
pub async fn record_download(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::record_download_handler(request, auth, store).await
}

#[post("/resumes/reorder", data = "<request>")]
pub async fn reorder_resume(
    request: Json<StandardRequest<ReorderRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::reorder_resume_handler(request, auth, store).await
}

#[post("/resumes/enhance", data = "<request>")]
pub async fn enhance_resume(
    request: Json<StandardRequest<EnhanceRequest>>,
    auth: AuthenticatedUser,
    assistant: &State<CareerAssistant>,
) -> Result<Json<DataResponse<EnhanceResponse>>, Json<StandardErrorResponse>> {
    handlers::enhance_resume_handler(request, auth, assistant).await
}

// ===== System =====

#[get("/templates")]
pub async fn get_templates() -> Json<DataResponse<Vec<TemplateInfo>>> {
    handlers::get_templates_handler().await
}

#[get("/me")]
pub async fn get_current_user(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    handlers::get_current_user_handler(auth).await
}

#[get("/me", rank = 2)]
pub async fn get_current_user_error() -> Json<StandardErrorResponse> {
    handlers::get_current_user_error_handler().await
}

#[get("/health")]
pub async fn health(auth: OptionalAuth) -> Json<TextResponse> {
    handlers::health_handler(auth).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, port: u16) -> Result<()> {
    let mut db_config = DatabaseConfig::new(config.environment.database_path.clone());

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    let project_id =
        std::env::var("AUTH_PROJECT_ID").unwrap_or_else(|_| "resumate-app".to_string());
    let mut auth_config = AuthConfig::new(project_id);

    if let Err(e) = auth_config.update_signing_keys().await {
        error!("Failed to fetch identity provider keys: {}", e);
        return Err(e);
    }

    let completion_client = CompletionClient::from_config(&config.service)?;
    if !completion_client.available() {
        info!("No completion API key configured, AI adapters run in fallback mode");
    }

    let assistant = CareerAssistant::new(completion_client.clone());
    let analyzer = ResumeAnalyzer::new(completion_client.clone());
    let ai_jobs = AiJobSearch::new(completion_client);

    let jobs_client = JobSearchClient::new(
        config.service.jobs_api_url.clone(),
        config.service.jobs_api_key.clone(),
        config.service.timeout_seconds,
    )?;

    let store = DocumentStore::new(config.environment.store_path.clone());

    info!("Starting Resumate API server");
    info!("Database: {}", config.environment.database_path.display());
    info!("Store: {}", config.environment.store_path.display());

    // Raise the body limits above the 10MB intake cap so oversized uploads
    // reach the validation path and get the proper error message
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"))
        .merge(("limits.file", "25 MiB"))
        .merge(("limits.data-form", "25 MiB"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(auth_config)
        .manage(db_config)
        .manage(store)
        .manage(assistant)
        .manage(analyzer)
        .manage(ai_jobs)
        .manage(jobs_client)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                chat,
                chat_history,
                analyze_resume,
                latest_analysis,
                search_jobs,
                suggest_jobs,
                get_profile,
                update_profile,
                upload_avatar,
                get_avatar,
                list_resumes,
                get_resume,
                create_resume,
                save_resume,
                delete_resume,
                favorite_resume,
                record_view,
                record_download,
                reorder_resume,
                enhance_resume,
                get_templates,
                get_current_user,
                get_current_user_error,
                health,
                options,
            ],
        )
        .launch()
        .await;

    Ok(())
}
