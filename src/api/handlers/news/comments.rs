//! Comment endpoints scoped to an article, plus deletion by comment id.

use axum::{
    Json,
    extract::{Extension, Path, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;

use super::{
    COMMENT_NOT_FOUND,
    gate::{self, Scope},
    storage::{delete_comment, fetch_comments, insert_comment},
    types::{CommentResponse, CommentsResponse, NewCommentRequest},
};
use crate::api::handlers::{ApiError, ErrorMessage};

#[utoipa::path(
    get,
    path = "/api/articles/{article_id}/comments",
    params(("article_id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Comments, newest first. Empty when the article has none.", body = CommentsResponse),
        (status = 400, description = "Invalid article_id.", body = ErrorMessage),
        (status = 404, description = "Article not found.", body = ErrorMessage),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    article_id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let (article_id, ()) =
        match gate::admit(&pool, Scope::Article, article_id, gate::no_body).await {
            Ok(admitted) => admitted,
            Err(err) => return err.into_response(),
        };

    match fetch_comments(&pool, article_id).await {
        Ok(comments) => (StatusCode::OK, Json(CommentsResponse { comments })).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/articles/{article_id}/comments",
    request_body = NewCommentRequest,
    params(("article_id" = i32, Path, description = "Article id")),
    responses(
        (status = 201, description = "Comment created.", body = CommentResponse),
        (status = 400, description = "Invalid article_id or missing username/body.", body = ErrorMessage),
        (status = 404, description = "Article or user not found.", body = ErrorMessage),
    ),
    tag = "comments"
)]
/// Creates a comment on an article. `votes` starts at 0 and `created_at` at the insert time.
pub async fn create_comment(
    article_id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
    payload: Option<Json<NewCommentRequest>>,
) -> impl IntoResponse {
    let payload = payload.map(|Json(payload)| payload);
    let (article_id, comment) = match gate::admit(&pool, Scope::Article, article_id, || {
        gate::new_comment(payload)
    })
    .await
    {
        Ok(admitted) => admitted,
        Err(err) => return err.into_response(),
    };

    match insert_comment(&pool, article_id, &comment).await {
        Ok(comment) => (StatusCode::CREATED, Json(CommentResponse { comment })).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    params(("comment_id" = i32, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted."),
        (status = 400, description = "Invalid comment_id.", body = ErrorMessage),
        (status = 404, description = "Comment not found.", body = ErrorMessage),
    ),
    tag = "comments"
)]
/// Deletes a comment. Deleting the same id twice reports `404` the second time.
pub async fn remove_comment(
    comment_id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let (comment_id, ()) =
        match gate::admit(&pool, Scope::Comment, comment_id, gate::no_body).await {
            Ok(admitted) => admitted,
            Err(err) => return err.into_response(),
        };

    match delete_comment(&pool, comment_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => ApiError::NotFound(COMMENT_NOT_FOUND).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
