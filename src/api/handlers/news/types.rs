//! Request/response types for the news API.
//!
//! Response bodies are wrapped in single-key envelopes (`{"articles": [...]}`,
//! `{"comment": {...}}`) so clients can tell collections from items. These
//! payloads are shared between handlers and `OpenAPI` generation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

/// Collection view of an article. The body is never part of a listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: String,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleDetail {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: String,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

/// Stored article columns, as returned by a vote update.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: String,
    pub votes: i32,
    pub article_img_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Comment {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ArticleQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}

/// Fields are optional so that missing values reach validation instead of the extractor.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewCommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

/// `inc_votes` is kept as raw JSON so the type check happens in validation.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VoteRequest {
    #[schema(value_type = Option<i32>)]
    pub inc_votes: Option<Value>,
}

/// Validated comment payload.
#[derive(Debug, PartialEq, Eq)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub article: ArticleDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedArticleResponse {
    #[serde(rename = "updatedArticle")]
    pub updated_article: Article,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub comment: Comment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}
