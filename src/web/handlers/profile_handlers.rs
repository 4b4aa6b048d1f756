// src/web/handlers/profile_handlers.rs
//! Profile read/update and avatar endpoints

use crate::auth::AuthenticatedUser;
use crate::core::database::{DatabaseConfig, ProfileService, ProfileUpdate};
use crate::core::{DocumentStore, FsOps};
use crate::utils::get_file_extension;
use crate::web::types::{
    ActionResponse, AvatarInfo, AvatarUploadForm, DataResponse, ProfileData,
    StandardErrorResponse, StandardRequest, WithConversationId,
};
use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::serde::json::Json;
use rocket::State;
use std::path::PathBuf;
use tracing::{error, info};

const AVATAR_FILE_NAMES: &[&str] = &["avatar.png", "avatar.jpg", "avatar.jpeg"];

pub async fn get_profile_handler(
    auth: AuthenticatedUser,
) -> Json<DataResponse<ProfileData>> {
    Json(DataResponse::success(
        "Profile loaded".to_string(),
        ProfileData::from(auth.profile()),
        None,
    ))
}

pub async fn update_profile_handler(
    request: Json<StandardRequest<ProfileUpdate>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    if let Some(name) = &request.data.display_name {
        if name.trim().is_empty() {
            return Err(Json(StandardErrorResponse::new(
                "Display name cannot be empty".to_string(),
                "INVALID_NAME".to_string(),
                vec!["Provide a non-empty display name".to_string()],
                conversation_id,
            )));
        }
    }

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Database error occurred".to_string(),
                "DATABASE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                conversation_id,
            )));
        }
    };

    let profile_service = ProfileService::new(pool);

    match profile_service
        .update_profile(&auth.user.uid, &request.data)
        .await
    {
        Ok(true) => {
            info!("Profile updated for {}", auth.email());
            Ok(Json(ActionResponse::success(
                "Profile updated successfully".to_string(),
                "updated".to_string(),
                conversation_id,
            )))
        }
        Ok(false) => Err(Json(StandardErrorResponse::new(
            "Profile not found".to_string(),
            "NOT_FOUND".to_string(),
            vec!["Log in again to recreate your profile".to_string()],
            conversation_id,
        ))),
        Err(e) => {
            error!("Failed to update profile for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to update profile".to_string(),
                "UPDATE_ERROR".to_string(),
                vec!["Try again or contact support".to_string()],
                conversation_id,
            )))
        }
    }
}

pub async fn upload_avatar_handler(
    mut upload: Form<AvatarUploadForm<'_>>,
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<AvatarInfo>>, Json<StandardErrorResponse>> {
    let file_name = upload
        .file
        .raw_name()
        .and_then(|n| n.as_str())
        .unwrap_or("avatar.png")
        .to_string();

    let target_name = match get_file_extension(&file_name).as_deref() {
        Some("png") => "avatar.png",
        Some("jpg") => "avatar.jpg",
        Some("jpeg") => "avatar.jpeg",
        _ => {
            return Err(Json(StandardErrorResponse::new(
                "Only PNG and JPEG images are supported".to_string(),
                "INVALID_IMAGE".to_string(),
                vec!["Upload a .png or .jpg file".to_string()],
                None,
            )))
        }
    };

    let user_dir = store.user_dir(&auth.user_key());
    if let Err(e) = FsOps::ensure_dir_exists(&user_dir).await {
        error!("Failed to create user directory: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to access user data directory".to_string(),
            "STORE_ERROR".to_string(),
            vec!["Contact support if this persists".to_string()],
            None,
        )));
    }

    // Replace any previous avatar regardless of its extension
    for name in AVATAR_FILE_NAMES {
        let _ = FsOps::remove_file_safe(&user_dir.join(name)).await;
    }

    let avatar_path = user_dir.join(target_name);

    if let Err(e) = upload.file.persist_to(&avatar_path).await {
        error!("Failed to save avatar: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to save uploaded file".to_string(),
            "SAVE_ERROR".to_string(),
            vec!["Please try again".to_string()],
            None,
        )));
    }

    // Validate magic bytes; remove the file when it lies about its format
    if let Err(e) = FsOps::validate_image(&avatar_path).await {
        error!("Invalid avatar image: {}", e);
        let _ = FsOps::remove_file_safe(&avatar_path).await;
        return Err(Json(StandardErrorResponse::new(
            format!("Invalid image file: {}", e),
            "INVALID_IMAGE".to_string(),
            vec!["Please upload a valid PNG or JPEG image".to_string()],
            None,
        )));
    }

    info!("Avatar uploaded for {}", auth.email());

    Ok(Json(DataResponse::success(
        "Avatar uploaded successfully".to_string(),
        AvatarInfo {
            url: "/api/profile/avatar".to_string(),
        },
        None,
    )))
}

pub async fn get_avatar_handler(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<NamedFile, Json<StandardErrorResponse>> {
    let user_dir = store.user_dir(&auth.user_key());

    let avatar_path = find_avatar(&user_dir);

    let avatar_path = match avatar_path {
        Some(path) => path,
        None => {
            return Err(Json(StandardErrorResponse::new(
                "Avatar not found".to_string(),
                "NOT_FOUND".to_string(),
                vec!["Upload an avatar first".to_string()],
                None,
            )))
        }
    };

    match NamedFile::open(&avatar_path).await {
        Ok(file) => Ok(file),
        Err(e) => {
            error!("Failed to serve avatar: {}", e);
            Err(Json(StandardErrorResponse::new(
                "Failed to serve avatar".to_string(),
                "FILE_ERROR".to_string(),
                vec!["Try again or contact support".to_string()],
                None,
            )))
        }
    }
}

fn find_avatar(user_dir: &std::path::Path) -> Option<PathBuf> {
    AVATAR_FILE_NAMES
        .iter()
        .map(|name| user_dir.join(name))
        .find(|path| path.exists())
}
