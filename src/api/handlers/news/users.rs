//! Read-only user endpoints.

use axum::{
    Json,
    extract::{Extension, Path, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;

use super::{
    USER_NOT_FOUND,
    storage::{fetch_user, fetch_users},
    types::{UserResponse, UsersResponse},
};
use crate::api::handlers::{ApiError, ErrorMessage};

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List users.", body = UsersResponse),
    ),
    tag = "users"
)]
pub async fn list_users(pool: Extension<PgPool>) -> impl IntoResponse {
    match fetch_users(&pool).await {
        Ok(users) => (StatusCode::OK, Json(UsersResponse { users })).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User detail.", body = UserResponse),
        (status = 404, description = "User not found.", body = ErrorMessage),
    ),
    tag = "users"
)]
/// A username axum cannot decode cannot exist, so it is reported as not found.
pub async fn get_user(
    username: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let Ok(Path(username)) = username else {
        return ApiError::NotFound(USER_NOT_FOUND).into_response();
    };

    match fetch_user(&pool, &username).await {
        Ok(Some(user)) => (StatusCode::OK, Json(UserResponse { user })).into_response(),
        Ok(None) => ApiError::NotFound(USER_NOT_FOUND).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
