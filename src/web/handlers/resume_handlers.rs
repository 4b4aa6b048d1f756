// src/web/handlers/resume_handlers.rs
//! Resume CRUD, favorite flag, counters and AI field rewrites.
//!
//! Saves are last-write-wins: no version check, no lock against a second
//! editing session.

use crate::ai::CareerAssistant;
use crate::auth::AuthenticatedUser;
use crate::core::DocumentStore;
use crate::editor::Resume;
use crate::web::types::{
    ActionResponse, CreateResumeRequest, DataResponse, EnhanceRequest, EnhanceResponse,
    ReorderRequest, ResumeIdRequest, SaveResumeRequest, StandardErrorResponse, StandardRequest,
    WithConversationId,
};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

const DEFAULT_TEMPLATE: &str = "modern";

fn store_error(
    context: &str,
    e: anyhow::Error,
    conversation_id: Option<String>,
) -> Json<StandardErrorResponse> {
    error!("{}: {}", context, e);
    Json(StandardErrorResponse::new(
        context.to_string(),
        "STORE_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        conversation_id,
    ))
}

fn not_found(id: &str, conversation_id: Option<String>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("Resume '{}' not found", id),
        "NOT_FOUND".to_string(),
        vec!["Check the resume id and try again".to_string()],
        conversation_id,
    ))
}

pub async fn list_resumes_handler(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Vec<Resume>>>, Json<StandardErrorResponse>> {
    match store.list_resumes(&auth.user_key()).await {
        Ok(resumes) => Ok(Json(DataResponse::success(
            format!("{} resumes", resumes.len()),
            resumes,
            None,
        ))),
        Err(e) => Err(store_error("Failed to list resumes", e, None)),
    }
}

pub async fn get_resume_handler(
    id: String,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Resume>>, Json<StandardErrorResponse>> {
    match store.load_resume(&auth.user_key(), &id).await {
        Ok(Some(resume)) => Ok(Json(DataResponse::success(
            "Resume loaded".to_string(),
            resume,
            None,
        ))),
        Ok(None) => Err(not_found(&id, None)),
        Err(e) => Err(store_error("Failed to load resume", e, None)),
    }
}

pub async fn create_resume_handler(
    request: Json<StandardRequest<CreateResumeRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Resume>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let title = request.data.title.trim();

    if title.is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "Resume title cannot be empty".to_string(),
            "INVALID_TITLE".to_string(),
            vec!["Provide a title for the new resume".to_string()],
            conversation_id,
        )));
    }

    let template_id = request
        .data
        .template_id
        .as_deref()
        .unwrap_or(DEFAULT_TEMPLATE);

    let resume = Resume::new(title, template_id);

    if let Err(e) = store.save_resume(&auth.user_key(), &resume).await {
        return Err(store_error("Failed to create resume", e, conversation_id));
    }

    info!("Created resume '{}' for {}", resume.id, auth.email());

    Ok(Json(DataResponse::success(
        format!("Resume '{}' created", title),
        resume,
        conversation_id,
    )))
}

pub async fn save_resume_handler(
    request: Json<StandardRequest<SaveResumeRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let mut resume = request.into_inner().data.resume;

    if resume.id.trim().is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "Resume id cannot be empty".to_string(),
            "INVALID_ID".to_string(),
            vec!["Create the resume before saving it".to_string()],
            conversation_id,
        )));
    }

    resume.touch();

    if let Err(e) = store.save_resume(&auth.user_key(), &resume).await {
        return Err(store_error("Failed to save resume", e, conversation_id));
    }

    Ok(Json(ActionResponse::success(
        format!("Resume '{}' saved", resume.title),
        "saved".to_string(),
        conversation_id,
    )))
}

pub async fn delete_resume_handler(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let id = &request.data.id;

    match store.delete_resume(&auth.user_key(), id).await {
        Ok(true) => {
            info!("Deleted resume '{}' for {}", id, auth.email());
            Ok(Json(ActionResponse::success(
                "Resume deleted".to_string(),
                "deleted".to_string(),
                conversation_id,
            )))
        }
        Ok(false) => Err(not_found(id, conversation_id)),
        Err(e) => Err(store_error("Failed to delete resume", e, conversation_id)),
    }
}

pub async fn favorite_resume_handler(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let id = &request.data.id;
    let user_key = auth.user_key();

    let mut resume = match store.load_resume(&user_key, id).await {
        Ok(Some(resume)) => resume,
        Ok(None) => return Err(not_found(id, conversation_id)),
        Err(e) => return Err(store_error("Failed to load resume", e, conversation_id)),
    };

    resume.favorite = !resume.favorite;
    resume.touch();

    if let Err(e) = store.save_resume(&user_key, &resume).await {
        return Err(store_error("Failed to save resume", e, conversation_id));
    }

    let action = if resume.favorite {
        "favorited"
    } else {
        "unfavorited"
    };

    Ok(Json(ActionResponse::success(
        format!("Resume '{}' {}", resume.title, action),
        action.to_string(),
        conversation_id,
    )))
}

async fn bump_counter(
    auth: &AuthenticatedUser,
    store: &DocumentStore,
    id: &str,
    kind: &str,
    conversation_id: Option<String>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let user_key = auth.user_key();

    let mut resume = match store.load_resume(&user_key, id).await {
        Ok(Some(resume)) => resume,
        Ok(None) => return Err(not_found(id, conversation_id)),
        Err(e) => return Err(store_error("Failed to load resume", e, conversation_id)),
    };

    match kind {
        "view" => resume.view_count += 1,
        _ => resume.download_count += 1,
    }

    if let Err(e) = store.save_resume(&user_key, &resume).await {
        return Err(store_error("Failed to save resume", e, conversation_id));
    }

    Ok(Json(ActionResponse::success(
        format!("Recorded {}", kind),
        "recorded".to_string(),
        conversation_id,
    )))
}

pub async fn record_view_handler(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    bump_counter(&auth, store, &request.data.id, "view", conversation_id).await
}

pub async fn record_download_handler(
    request: Json<StandardRequest<ResumeIdRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    bump_counter(&auth, store, &request.data.id, "download", conversation_id).await
}

pub async fn reorder_resume_handler(
    request: Json<StandardRequest<ReorderRequest>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let data = &request.data;
    let user_key = auth.user_key();

    let up = match data.direction.as_str() {
        "up" => true,
        "down" => false,
        other => {
            return Err(Json(StandardErrorResponse::new(
                format!("Unknown direction: '{}'", other),
                "INVALID_DIRECTION".to_string(),
                vec!["Use 'up' or 'down'".to_string()],
                conversation_id,
            )))
        }
    };

    let mut resume = match store.load_resume(&user_key, &data.id).await {
        Ok(Some(resume)) => resume,
        Ok(None) => return Err(not_found(&data.id, conversation_id)),
        Err(e) => return Err(store_error("Failed to load resume", e, conversation_id)),
    };

    let moved = match (data.section.as_str(), up) {
        ("experience", true) => resume.content.move_experience_up(data.index),
        ("experience", false) => resume.content.move_experience_down(data.index),
        ("education", true) => resume.content.move_education_up(data.index),
        ("education", false) => resume.content.move_education_down(data.index),
        ("projects", true) => resume.content.move_project_up(data.index),
        ("projects", false) => resume.content.move_project_down(data.index),
        (other, _) => {
            return Err(Json(StandardErrorResponse::new(
                format!("Unknown section: '{}'", other),
                "INVALID_SECTION".to_string(),
                vec!["Use one of: experience, education, projects".to_string()],
                conversation_id,
            )))
        }
    };

    if moved {
        resume.touch();
        if let Err(e) = store.save_resume(&user_key, &resume).await {
            return Err(store_error("Failed to save resume", e, conversation_id));
        }
    }

    Ok(Json(ActionResponse::success(
        if moved {
            format!("Moved {} entry {}", data.section, data.direction)
        } else {
            "Nothing to move".to_string()
        },
        "reordered".to_string(),
        conversation_id,
    )))
}

pub async fn enhance_resume_handler(
    request: Json<StandardRequest<EnhanceRequest>>,
    auth: AuthenticatedUser,
    assistant: &State<CareerAssistant>,
) -> Result<Json<DataResponse<EnhanceResponse>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let text = request.data.text.trim();

    if text.is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "Text to enhance cannot be empty".to_string(),
            "INVALID_TEXT".to_string(),
            vec!["Provide the field content to rewrite".to_string()],
            conversation_id,
        )));
    }

    info!(
        "Enhancing '{}' field for {}",
        request.data.field,
        auth.email()
    );

    let enhanced = match request.data.field.as_str() {
        "summary" => assistant.improve_summary(text).await,
        "experience" => assistant.improve_experience(text).await,
        "skills" => assistant.suggest_skills(text).await.join(", "),
        other => {
            return Err(Json(StandardErrorResponse::new(
                format!("Unknown field: '{}'", other),
                "INVALID_FIELD".to_string(),
                vec!["Use one of: summary, experience, skills".to_string()],
                conversation_id,
            )))
        }
    };

    Ok(Json(DataResponse::success(
        "Field enhanced".to_string(),
        EnhanceResponse { text: enhanced },
        conversation_id,
    )))
}
