// src/web/handlers/system_handlers.rs
use crate::auth::{AuthenticatedUser, OptionalAuth};
use crate::web::types::{DataResponse, StandardErrorResponse, TemplateInfo, TextResponse, UserInfo};

use rocket::serde::json::Json;
use tracing::info;

/// Static template catalog for the editor's picker
pub async fn get_templates_handler() -> Json<DataResponse<Vec<TemplateInfo>>> {
    let templates = vec![
        TemplateInfo {
            id: "modern".to_string(),
            name: "Modern".to_string(),
            description: "Clean two-column layout with an accent color".to_string(),
        },
        TemplateInfo {
            id: "classic".to_string(),
            name: "Classic".to_string(),
            description: "Traditional single-column layout".to_string(),
        },
        TemplateInfo {
            id: "creative".to_string(),
            name: "Creative".to_string(),
            description: "Bold headings for design-oriented roles".to_string(),
        },
        TemplateInfo {
            id: "minimal".to_string(),
            name: "Minimal".to_string(),
            description: "Whitespace-heavy layout, ATS friendly".to_string(),
        },
    ];

    Json(DataResponse::success(
        format!("{} templates", templates.len()),
        templates,
        None,
    ))
}

pub async fn get_current_user_handler(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    let user = auth.user();

    Json(DataResponse::success(
        "User authenticated successfully".to_string(),
        UserInfo {
            uid: user.uid.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            picture: user.picture.clone(),
        },
        None,
    ))
}

pub async fn get_current_user_error_handler() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Authentication required".to_string(),
        "AUTHORIZATION_ERROR".to_string(),
        vec!["Login is required".to_string()],
        None,
    ))
}

pub async fn health_handler(auth: OptionalAuth) -> Json<TextResponse> {
    if let Some(user) = auth.user {
        info!("Health check by authenticated user: {}", user.email());
    } else {
        info!("Health check by anonymous user");
    }
    Json(TextResponse::success("OK".to_string(), None))
}
