// src/web/handlers/analysis_handlers.rs
//! Resume upload, analysis and latest-result retrieval

use crate::ai::{fallbacks, ResumeAnalyzer};
use crate::auth::AuthenticatedUser;
use crate::core::DocumentStore;
use crate::intake;
use crate::web::types::{DataResponse, ResumeUploadForm, StandardErrorResponse};
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn analyze_resume_handler(
    upload: Form<ResumeUploadForm<'_>>,
    auth: AuthenticatedUser,
    analyzer: &State<ResumeAnalyzer>,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<crate::ai::AnalysisResult>>, Json<StandardErrorResponse>> {
    let file_name = upload
        .resume_file
        .raw_name()
        .and_then(|n| n.as_str())
        .unwrap_or("resume.pdf")
        .to_string();
    let file_size = upload.resume_file.len();

    info!(
        "User {} uploading {} ({} bytes) for analysis",
        auth.email(),
        file_name,
        file_size
    );

    // Validation runs before the file is read or any upstream call is made
    if let Err(e) = intake::validate_upload(&file_name, file_size) {
        return Err(Json(StandardErrorResponse::new(
            e.to_string(),
            "INVALID_FILE".to_string(),
            vec![
                "Upload a PDF, DOCX, DOC, JPEG, PNG or TXT file".to_string(),
                "Keep the file under 10MB".to_string(),
            ],
            None,
        )));
    }

    let file_path = match upload.resume_file.path() {
        Some(path) => path,
        None => {
            error!("Uploaded file has no backing path");
            return Err(Json(StandardErrorResponse::new(
                "Failed to process uploaded file".to_string(),
                "UPLOAD_ERROR".to_string(),
                vec!["Try uploading the file again".to_string()],
                None,
            )));
        }
    };

    let bytes = match tokio::fs::read(file_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read uploaded file: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to process uploaded file".to_string(),
                "UPLOAD_ERROR".to_string(),
                vec!["Try uploading the file again".to_string()],
                None,
            )));
        }
    };

    // Unreadable content still produces a result: the analyzer's fallback
    // stands in so the results page always has data
    let analysis = match intake::extract_text(&bytes, &file_name) {
        Ok(text) => analyzer.analyze_comprehensive(&text).await,
        Err(e) => {
            warn!(
                "Text extraction failed for {} ({}), using fallback analysis",
                file_name, e
            );
            fallbacks::analysis()
        }
    };

    if let Err(e) = store
        .save_latest_analysis(&auth.user_key(), &analysis)
        .await
    {
        warn!("Failed to store latest analysis for {}: {}", auth.email(), e);
    }

    Ok(Json(DataResponse::success(
        "Resume analyzed".to_string(),
        analysis,
        None,
    )))
}

pub async fn latest_analysis_handler(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<crate::ai::AnalysisResult>>, Json<StandardErrorResponse>> {
    match store.load_latest_analysis(&auth.user_key()).await {
        Ok(Some(analysis)) => Ok(Json(DataResponse::success(
            "Latest analysis".to_string(),
            analysis,
            None,
        ))),
        Ok(None) => Err(Json(StandardErrorResponse::new(
            "No analysis available yet".to_string(),
            "NOT_FOUND".to_string(),
            vec!["Upload a resume on the analysis page first".to_string()],
            None,
        ))),
        Err(e) => {
            error!("Failed to load latest analysis: {}", e);
            Err(Json(StandardErrorResponse::new(
                "Failed to load latest analysis".to_string(),
                "STORE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                None,
            )))
        }
    }
}
