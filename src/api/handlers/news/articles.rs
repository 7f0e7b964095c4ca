//! Article endpoints: listing, single fetch and vote updates.

use axum::{
    Json,
    extract::{
        Extension, Path, Query,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;

use super::{
    ARTICLE_NOT_FOUND,
    gate::{self, Scope},
    listing::Listing,
    storage::{fetch_article, fetch_articles, increment_votes},
    types::{
        ArticleQuery, ArticleResponse, ArticlesResponse, UpdatedArticleResponse, VoteRequest,
    },
};
use crate::api::handlers::{ApiError, ErrorMessage};

#[utoipa::path(
    get,
    path = "/api/articles",
    params(
        ("sort_by" = Option<String>, Query, description = "One of article_id, title, topic, author, created_at, votes, comment_count, article_img_url. Defaults to created_at."),
        ("order" = Option<String>, Query, description = "ASC or DESC, case-insensitive. Defaults to DESC."),
        ("topic" = Option<String>, Query, description = "Only return articles with this topic slug."),
    ),
    responses(
        (status = 200, description = "List articles without bodies.", body = ArticlesResponse),
        (status = 400, description = "Invalid sort_by or order.", body = ErrorMessage),
    ),
    tag = "articles"
)]
/// Lists articles with their comment counts.
/// `sort_by` and `order` are checked against allow-lists before the query is composed.
pub async fn list_articles(
    query: Result<Query<ArticleQuery>, QueryRejection>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let listing = match Listing::from_extracted(query) {
        Ok(listing) => listing,
        Err(err) => return err.into_response(),
    };

    match fetch_articles(&pool, &listing).await {
        Ok(articles) => (StatusCode::OK, Json(ArticlesResponse { articles })).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/articles/{article_id}",
    params(("article_id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article with body and comment count.", body = ArticleResponse),
        (status = 400, description = "Invalid article_id.", body = ErrorMessage),
        (status = 404, description = "Article not found.", body = ErrorMessage),
    ),
    tag = "articles"
)]
/// Fetches one article. The lookup doubles as the existence check.
pub async fn get_article(
    article_id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let article_id = match Scope::Article.parse_path(article_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match fetch_article(&pool, article_id).await {
        Ok(Some(article)) => (StatusCode::OK, Json(ArticleResponse { article })).into_response(),
        Ok(None) => ApiError::NotFound(ARTICLE_NOT_FOUND).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/articles/{article_id}",
    request_body = VoteRequest,
    params(("article_id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Votes incremented.", body = UpdatedArticleResponse),
        (status = 400, description = "Invalid article_id or inc_votes, or the total would leave the 32-bit range.", body = ErrorMessage),
        (status = 404, description = "Article not found.", body = ErrorMessage),
    ),
    tag = "articles"
)]
/// Adds `inc_votes` to the article's votes. The increment may be negative and is not clamped;
/// a total outside the 32-bit votes column is rejected with `400`.
pub async fn patch_article_votes(
    article_id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
    payload: Option<Json<VoteRequest>>,
) -> impl IntoResponse {
    let payload = payload.map(|Json(payload)| payload);
    let (article_id, inc_votes) = match gate::admit(&pool, Scope::Article, article_id, || {
        gate::vote_increment(payload)
    })
    .await
    {
        Ok(admitted) => admitted,
        Err(err) => return err.into_response(),
    };

    match increment_votes(&pool, article_id, inc_votes).await {
        Ok(Some(updated_article)) => (
            StatusCode::OK,
            Json(UpdatedArticleResponse { updated_article }),
        )
            .into_response(),
        Ok(None) => ApiError::NotFound(ARTICLE_NOT_FOUND).into_response(),
        Err(err) => err.into_response(),
    }
}
