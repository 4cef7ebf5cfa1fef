//! Comment handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::CommentRequest;

use crate::middleware::auth::OptionalUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/{id}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let comments = state.posts.comments(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .posts
        .add_comment(user.identity(), &path.into_inner(), body.into_inner().text)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}
