use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use service::message::domain::{Message, MessageInput};

use crate::errors::{ApiError, READ_FAILED, SAVE_FAILED};
use crate::state::ServerState;

#[derive(Serialize)]
pub struct WriteOutput {
    pub success: bool,
    pub message: &'static str,
    pub data: Message,
}

#[utoipa::path(get, path = "/api/aviso", tag = "messages", responses((status = 200, description = "Current message", body = crate::openapi::MessageDoc), (status = 404, description = "No message yet", body = crate::openapi::ErrorResponse), (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)))]
pub async fn get_aviso(State(state): State<ServerState>) -> Result<Json<Message>, ApiError> {
    let message = state
        .messages
        .read()
        .await
        .map_err(|e| ApiError::from_store(e, READ_FAILED))?;
    Ok(Json(message))
}

#[utoipa::path(post, path = "/api/mensagem", tag = "messages", request_body = crate::openapi::MessageDoc, responses((status = 200, description = "Message replaced", body = crate::openapi::WriteResponse), (status = 400, description = "Missing title or mensagem", body = crate::openapi::ErrorResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse), (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)), security(("bearer" = [])))]
pub async fn post_mensagem(
    State(state): State<ServerState>,
    payload: Result<Json<MessageInput>, JsonRejection>,
) -> Result<Json<WriteOutput>, ApiError> {
    // A body that is not a JSON object carries no title or mensagem
    let Json(input) = payload.map_err(|_| ApiError::Validation)?;
    let data = state
        .messages
        .write(input)
        .await
        .map_err(|e| ApiError::from_store(e, SAVE_FAILED))?;
    info!(backend = state.messages.backend(), "announcement updated");
    Ok(Json(WriteOutput { success: true, message: "Mensagem alterada com sucesso!", data }))
}
