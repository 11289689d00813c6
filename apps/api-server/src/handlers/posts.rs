//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use postboard_core::DomainError;
use postboard_core::domain::{Post, PostChanges};
use postboard_core::error::RepoError;
use postboard_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

/// A malformed id cannot match any post.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::NotFound(format!("Post with id {} not found", raw)))
}

fn or_not_found(err: RepoError, id: Uuid) -> AppError {
    match err {
        RepoError::NotFound => not_found(id).into(),
        other => other.into(),
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = Post::new(
        req.title.unwrap_or_default(),
        req.text.unwrap_or_default(),
        req.author.unwrap_or_default(),
    );
    post.validate()?;

    let saved = state.posts.insert(post).await?;
    tracing::info!(post_id = %saved.id, "Post created");

    Ok(HttpResponse::Created().json(saved))
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();

    // An explicit null clears the field, which then fails validation
    let changes = PostChanges {
        title: req.title.map(Option::unwrap_or_default),
        text: req.text.map(Option::unwrap_or_default),
        author: req.author.map(Option::unwrap_or_default),
    };

    let mut merged = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    merged.apply(changes.clone());
    merged.validate()?;

    // Only the supplied columns are written
    let updated = state
        .posts
        .update(id, changes)
        .await
        .map_err(|e| or_not_found(e, id))?;
    tracing::info!(post_id = %id, "Post updated");

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    state.posts.delete(id).await.map_err(|e| or_not_found(e, id))?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
