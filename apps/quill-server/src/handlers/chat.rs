//! Assistant chat handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::ChatMessageRequest;

use crate::middleware::auth::OptionalUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/chat/messages
pub async fn history(state: web::Data<AppState>, user: OptionalUser) -> AppResult<HttpResponse> {
    let messages = state.chat.history(user.identity()).await?;
    Ok(HttpResponse::Ok().json(messages))
}

/// POST /api/chat/messages
pub async fn send(
    state: web::Data<AppState>,
    user: OptionalUser,
    body: web::Json<ChatMessageRequest>,
) -> AppResult<HttpResponse> {
    let message = state
        .chat
        .send(user.identity(), body.into_inner().text)
        .await?;

    Ok(HttpResponse::Created().json(message))
}
