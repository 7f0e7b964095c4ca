use super::handlers::{
    health,
    news::{articles, comments, topics, users},
};
use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

/// `OpenAPI` document for every documented route.
///
/// Add new endpoints to `paths(...)` so they show up in `/api/openapi.json`
/// and in the output of the `openapi` binary. Title, version, description,
/// contact and license come from `Cargo.toml`.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        topics::list_topics,
        articles::list_articles,
        articles::get_article,
        articles::patch_article_votes,
        comments::list_comments,
        comments::create_comment,
        comments::remove_comment,
        users::list_users,
        users::get_user,
    ),
    tags(
        (name = "topics", description = "Article categories"),
        (name = "articles", description = "Articles with live comment counts and votes"),
        (name = "comments", description = "Comments on articles"),
        (name = "users", description = "Comment and article authors"),
        (name = "health", description = "Service and database health"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

// axum handler for GET /api/openapi.json
pub async fn openapi_json() -> impl IntoResponse {
    Json(openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn openapi_tags_and_paths() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        for name in ["topics", "articles", "comments", "users", "health"] {
            assert!(tags.iter().any(|tag| tag.name == name), "missing tag {name}");
        }
        for path in [
            "/api/topics",
            "/api/articles",
            "/api/articles/{article_id}",
            "/api/articles/{article_id}/comments",
            "/api/comments/{comment_id}",
            "/api/users",
            "/api/users/{username}",
            "/health",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
