// src/web/handlers/chat_handlers.rs
//! Career-chat endpoints

use crate::ai::CareerAssistant;
use crate::auth::AuthenticatedUser;
use crate::core::store::{ChatMessage, DocumentStore};
use crate::web::types::{
    ChatReply, ChatRequest, DataResponse, StandardErrorResponse, StandardRequest,
    WithConversationId,
};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

pub async fn chat_handler(
    request: Json<StandardRequest<ChatRequest>>,
    auth: AuthenticatedUser,
    assistant: &State<CareerAssistant>,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<ChatReply>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let message = request.data.message.trim();

    if message.is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "Message cannot be empty".to_string(),
            "INVALID_MESSAGE".to_string(),
            vec!["Type a question about your resume or career".to_string()],
            conversation_id,
        )));
    }

    let context = request.data.context.as_deref().unwrap_or("");

    info!("Chat message from {}", auth.email());

    let reply = assistant.chat_response(message, context).await;

    // The reply is already produced; a history write failure must not lose it
    let exchange = [
        ChatMessage::user(message),
        ChatMessage::assistant(reply.clone()),
    ];
    if let Err(e) = store
        .append_chat_messages(&auth.user_key(), &exchange)
        .await
    {
        warn!("Failed to append chat history for {}: {}", auth.email(), e);
    }

    Ok(Json(DataResponse::success(
        "Reply generated".to_string(),
        ChatReply { response: reply },
        conversation_id,
    )))
}

pub async fn chat_history_handler(
    auth: AuthenticatedUser,
    store: &State<DocumentStore>,
) -> Result<Json<DataResponse<Vec<ChatMessage>>>, Json<StandardErrorResponse>> {
    match store.chat_history(&auth.user_key()).await {
        Ok(history) => Ok(Json(DataResponse::success(
            format!("{} messages", history.len()),
            history,
            None,
        ))),
        Err(e) => {
            warn!("Failed to load chat history for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to load chat history".to_string(),
                "HISTORY_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                None,
            )))
        }
    }
}
