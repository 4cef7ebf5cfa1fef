//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Post;
use quill_core::feed::{Cursor, DateRange, PageSize, SearchState};
use quill_shared::dto::{
    CursorPageResponse, CursorQuery, FeedPageResponse, FeedQuery, PaginationResponse, PostRequest,
};

use crate::middleware::auth::OptionalUser;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound for `limit` on the cursor feed.
const MAX_CURSOR_LIMIT: usize = 50;

fn search_state(query: &FeedQuery) -> SearchState {
    SearchState::new()
        .with_query(query.q.clone().unwrap_or_default())
        .with_date_range(DateRange {
            start: query.from,
            end: query.to,
        })
        .with_page(query.page.unwrap_or(1))
}

/// GET /api/posts?q=&from=&to=&page=&page_size=
///
/// Filters and pages the live snapshot; no store round trip.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page_size = match query.page_size {
        Some(size) => PageSize::from_layout(size)
            .ok_or_else(|| AppError::BadRequest("page_size must be 6 or 12".to_string()))?,
        None => state.page_size,
    };

    let page = state.feed.page(&search_state(&query), page_size);
    let pagination = page.pagination();

    Ok(HttpResponse::Ok().json(FeedPageResponse {
        pagination: PaginationResponse {
            current: pagination.current,
            total: pagination.total,
            visible: pagination.is_visible(),
            previous: pagination.previous(),
            next: pagination.next(),
        },
        total_matches: page.total_matches,
        page_size: page_size.get(),
        posts: page.posts,
    }))
}

/// GET /api/posts/feed?cursor=&limit=
pub async fn feed(
    state: web::Data<AppState>,
    query: web::Query<CursorQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let cursor = query
        .cursor
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::parse::<Cursor>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let limit = query
        .limit
        .unwrap_or(state.page_size.get())
        .clamp(1, MAX_CURSOR_LIMIT);

    let items = state
        .posts
        .posts()
        .fetch_page(cursor.as_ref(), limit)
        .await?;
    let has_more = items.len() >= limit;
    let next_cursor = items
        .last()
        .filter(|_| has_more)
        .map(|last| Cursor::after(last).to_string());

    Ok(HttpResponse::Ok().json(CursorPageResponse {
        items,
        has_more,
        next_cursor,
    }))
}

/// GET /api/posts/mine
pub async fn mine(state: web::Data<AppState>, user: OptionalUser) -> AppResult<HttpResponse> {
    let posts: Vec<Post> = state.posts.mine(user.identity()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    user: OptionalUser,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(user.identity(), req.title, req.content)
        .await?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state.posts.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{id} - author only
pub async fn update(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .edit(user.identity(), &path.into_inner(), req.title, req.content)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id} - author only
pub async fn delete(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(user.identity(), &id).await?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
