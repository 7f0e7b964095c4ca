use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;

use super::{storage::fetch_topics, types::TopicsResponse};
use crate::api::handlers::ApiError;

#[utoipa::path(
    get,
    path = "/api/topics",
    responses(
        (status = 200, description = "List topics.", body = TopicsResponse),
    ),
    tag = "topics"
)]
pub async fn list_topics(pool: Extension<PgPool>) -> impl IntoResponse {
    match fetch_topics(&pool).await {
        Ok(topics) => (StatusCode::OK, Json(TopicsResponse { topics })).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
