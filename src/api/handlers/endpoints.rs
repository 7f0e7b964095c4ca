//! Static description of the public endpoints, served verbatim by `GET /api`.

use axum::{Json, response::IntoResponse};
use serde_json::{Map, Value, json};

/// Returns the endpoint map keyed by `"METHOD /path"`.
#[must_use]
pub fn endpoints() -> Value {
    let entries = [
        (
            "GET /api",
            json!({
                "description": "serves up a json representation of all the available endpoints of the api"
            }),
        ),
        (
            "GET /api/topics",
            json!({
                "description": "serves an array of all topics",
                "queries": [],
                "exampleResponse": {
                    "topics": [{ "slug": "football", "description": "Footie!" }]
                }
            }),
        ),
        (
            "GET /api/articles",
            json!({
                "description": "serves an array of all articles without their body, with a comment_count",
                "queries": ["topic", "sort_by", "order"],
                "exampleResponse": {
                    "articles": [
                        {
                            "article_id": 34,
                            "title": "Seafood substitutions are increasing",
                            "topic": "cooking",
                            "author": "weegembump",
                            "created_at": "2018-05-30T15:59:13.341Z",
                            "votes": 0,
                            "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                            "comment_count": 6
                        }
                    ]
                }
            }),
        ),
        (
            "GET /api/articles/:article_id",
            json!({
                "description": "serves a single article with its body and comment_count",
                "queries": [],
                "exampleResponse": {
                    "article": {
                        "article_id": 1,
                        "title": "Living in the shadow of a great man",
                        "topic": "mitch",
                        "author": "butter_bridge",
                        "body": "I find this existence challenging",
                        "created_at": "2020-07-09T20:11:00.000Z",
                        "votes": 100,
                        "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                        "comment_count": 11
                    }
                }
            }),
        ),
        (
            "PATCH /api/articles/:article_id",
            json!({
                "description": "increments the votes of an article by inc_votes (which may be negative) and serves the updated article",
                "requestBody": { "inc_votes": 1 },
                "exampleResponse": {
                    "updatedArticle": {
                        "article_id": 1,
                        "title": "Living in the shadow of a great man",
                        "topic": "mitch",
                        "author": "butter_bridge",
                        "body": "I find this existence challenging",
                        "created_at": "2020-07-09T20:11:00.000Z",
                        "votes": 101,
                        "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700"
                    }
                }
            }),
        ),
        (
            "GET /api/articles/:article_id/comments",
            json!({
                "description": "serves an array of comments for the given article, newest first",
                "queries": [],
                "exampleResponse": {
                    "comments": [
                        {
                            "comment_id": 5,
                            "article_id": 1,
                            "author": "icellusedkars",
                            "body": "I hate streaming noses",
                            "votes": 0,
                            "created_at": "2020-11-03T21:00:00.000Z"
                        }
                    ]
                }
            }),
        ),
        (
            "POST /api/articles/:article_id/comments",
            json!({
                "description": "adds a comment to the given article and serves the created comment",
                "requestBody": { "username": "butter_bridge", "body": "What a read!" },
                "exampleResponse": {
                    "comment": {
                        "comment_id": 19,
                        "article_id": 1,
                        "author": "butter_bridge",
                        "body": "What a read!",
                        "votes": 0,
                        "created_at": "2024-01-01T12:00:00.000Z"
                    }
                }
            }),
        ),
        (
            "DELETE /api/comments/:comment_id",
            json!({
                "description": "deletes the given comment and responds with no content",
                "queries": []
            }),
        ),
        (
            "GET /api/users",
            json!({
                "description": "serves an array of all users",
                "queries": [],
                "exampleResponse": {
                    "users": [
                        {
                            "username": "butter_bridge",
                            "name": "jonny",
                            "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
                        }
                    ]
                }
            }),
        ),
        (
            "GET /api/users/:username",
            json!({
                "description": "serves a single user",
                "queries": [],
                "exampleResponse": {
                    "user": {
                        "username": "butter_bridge",
                        "name": "jonny",
                        "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
                    }
                }
            }),
        ),
    ];

    Value::Object(
        entries
            .into_iter()
            .map(|(route, entry)| (route.to_string(), entry))
            .collect::<Map<String, Value>>(),
    )
}

// axum handler for GET /api
pub async fn api_index() -> impl IntoResponse {
    Json(json!({ "endpoints": endpoints() }))
}
