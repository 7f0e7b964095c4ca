//! SQL storage helpers for topics, articles, comments and users.
//!
//! Every function issues exactly one parameterized statement against the pool
//! handed in by the caller and shapes the rows into response DTOs. Timestamps
//! are rendered in SQL as UTC ISO-8601 with millisecond precision.

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{debug, instrument};

use super::{
    ARTICLE_NOT_FOUND, USER_NOT_FOUND, VOTES_OUT_OF_RANGE,
    listing::Listing,
    types::{Article, ArticleDetail, ArticleSummary, Comment, NewComment, Topic, User},
};
use crate::api::handlers::ApiError;

#[instrument(skip(pool))]
pub(super) async fn fetch_topics(pool: &PgPool) -> Result<Vec<Topic>, sqlx::Error> {
    let query = r"
        SELECT slug, description
        FROM topics
        ORDER BY slug
    ";
    let rows = sqlx::query(query).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| Topic {
            slug: row.get("slug"),
            description: row.get("description"),
        })
        .collect())
}

/// Lists articles with their live comment counts, without bodies.
/// The `ORDER BY` clause comes from `Listing::order_by`, which only emits allow-listed fragments;
/// the topic filter is a bound parameter.
#[instrument(skip(pool))]
pub(super) async fn fetch_articles(
    pool: &PgPool,
    listing: &Listing,
) -> Result<Vec<ArticleSummary>, sqlx::Error> {
    let order_by = listing.order_by();
    let query = format!(
        r#"
        SELECT
            articles.article_id,
            articles.title,
            articles.topic,
            articles.author,
            to_char(articles.created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS.MS"Z"') AS created_at,
            articles.votes,
            articles.article_img_url,
            COUNT(comments.comment_id)::INTEGER AS comment_count
        FROM articles
        LEFT JOIN comments ON comments.article_id = articles.article_id
        WHERE ($1::VARCHAR IS NULL OR articles.topic = $1)
        GROUP BY articles.article_id
        {order_by}
        "#
    );
    debug!("article listing: {}", order_by);

    let rows = sqlx::query(&query)
        .bind(listing.topic.as_deref())
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| ArticleSummary {
            article_id: row.get("article_id"),
            title: row.get("title"),
            topic: row.get("topic"),
            author: row.get("author"),
            created_at: row.get("created_at"),
            votes: row.get("votes"),
            article_img_url: row.get("article_img_url"),
            comment_count: row.get("comment_count"),
        })
        .collect())
}

/// Fetches one article with its body and live comment count.
#[instrument(skip(pool))]
pub(super) async fn fetch_article(
    pool: &PgPool,
    article_id: i32,
) -> Result<Option<ArticleDetail>, sqlx::Error> {
    let query = r#"
        SELECT
            articles.article_id,
            articles.title,
            articles.topic,
            articles.author,
            articles.body,
            to_char(articles.created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS.MS"Z"') AS created_at,
            articles.votes,
            articles.article_img_url,
            COUNT(comments.comment_id)::INTEGER AS comment_count
        FROM articles
        LEFT JOIN comments ON comments.article_id = articles.article_id
        WHERE articles.article_id = $1
        GROUP BY articles.article_id
    "#;
    let row = sqlx::query(query)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|row| ArticleDetail {
        article_id: row.get("article_id"),
        title: row.get("title"),
        topic: row.get("topic"),
        author: row.get("author"),
        body: row.get("body"),
        created_at: row.get("created_at"),
        votes: row.get("votes"),
        article_img_url: row.get("article_img_url"),
        comment_count: row.get("comment_count"),
    }))
}

pub(super) async fn article_exists(pool: &PgPool, article_id: i32) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM articles WHERE article_id = $1")
        .bind(article_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub(super) async fn comment_exists(pool: &PgPool, comment_id: i32) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Newest first; comments created in the same instant fall back to id order.
#[instrument(skip(pool))]
pub(super) async fn fetch_comments(
    pool: &PgPool,
    article_id: i32,
) -> Result<Vec<Comment>, sqlx::Error> {
    let query = r#"
        SELECT
            comment_id,
            article_id,
            author,
            body,
            votes,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS.MS"Z"') AS created_at
        FROM comments
        WHERE article_id = $1
        ORDER BY comments.created_at DESC, comment_id DESC
    "#;
    let rows = sqlx::query(query).bind(article_id).fetch_all(pool).await?;
    Ok(rows.iter().map(comment_from_row).collect())
}

/// Inserts a comment; `votes` and `created_at` take their column defaults.
/// A missing author or article violates a foreign key and maps to `404`.
#[instrument(skip(pool, comment))]
pub(super) async fn insert_comment(
    pool: &PgPool,
    article_id: i32,
    comment: &NewComment,
) -> Result<Comment, ApiError> {
    let query = r#"
        INSERT INTO comments (article_id, author, body)
        VALUES ($1, $2, $3)
        RETURNING
            comment_id,
            article_id,
            author,
            body,
            votes,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS.MS"Z"') AS created_at
    "#;
    let row = sqlx::query(query)
        .bind(article_id)
        .bind(&comment.username)
        .bind(&comment.body)
        .fetch_one(pool)
        .await
        .map_err(|err| match missing_reference(&err) {
            Some(message) => ApiError::NotFound(message),
            None => ApiError::Database(err),
        })?;
    Ok(comment_from_row(&row))
}

/// Applies the increment in SQL so concurrent votes never overwrite each other.
/// Returns `None` if the article disappeared after the existence check.
/// A total that overflows the `INT` column (SQLSTATE 22003) is a client error.
#[instrument(skip(pool))]
pub(super) async fn increment_votes(
    pool: &PgPool,
    article_id: i32,
    inc_votes: i32,
) -> Result<Option<Article>, ApiError> {
    let query = r#"
        UPDATE articles
        SET votes = votes + $1
        WHERE article_id = $2
        RETURNING
            article_id,
            title,
            topic,
            author,
            body,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS.MS"Z"') AS created_at,
            votes,
            article_img_url
    "#;
    let row = sqlx::query(query)
        .bind(inc_votes)
        .bind(article_id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            if is_out_of_range(&err) {
                ApiError::BadRequest(VOTES_OUT_OF_RANGE)
            } else {
                ApiError::Database(err)
            }
        })?;
    Ok(row.map(|row| Article {
        article_id: row.get("article_id"),
        title: row.get("title"),
        topic: row.get("topic"),
        author: row.get("author"),
        body: row.get("body"),
        created_at: row.get("created_at"),
        votes: row.get("votes"),
        article_img_url: row.get("article_img_url"),
    }))
}

/// Returns `false` when no row was deleted.
#[instrument(skip(pool))]
pub(super) async fn delete_comment(pool: &PgPool, comment_id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[instrument(skip(pool))]
pub(super) async fn fetch_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let query = r"
        SELECT username, name, avatar_url
        FROM users
        ORDER BY username
    ";
    let rows = sqlx::query(query).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| User {
            username: row.get("username"),
            name: row.get("name"),
            avatar_url: row.get("avatar_url"),
        })
        .collect())
}

#[instrument(skip(pool))]
pub(super) async fn fetch_user(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let query = r"
        SELECT username, name, avatar_url
        FROM users
        WHERE username = $1
    ";
    let row = sqlx::query(query).bind(username).fetch_optional(pool).await?;
    Ok(row.map(|row| User {
        username: row.get("username"),
        name: row.get("name"),
        avatar_url: row.get("avatar_url"),
    }))
}

fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        comment_id: row.get("comment_id"),
        article_id: row.get("article_id"),
        author: row.get("author"),
        body: row.get("body"),
        votes: row.get("votes"),
        created_at: row.get("created_at"),
    }
}

/// Names the missing row behind a foreign key violation (SQLSTATE 23503).
fn missing_reference(err: &sqlx::Error) -> Option<&'static str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            if db_err.constraint() == Some("comments_article_id_fkey") {
                Some(ARTICLE_NOT_FOUND)
            } else {
                Some(USER_NOT_FOUND)
            }
        }
        _ => None,
    }
}

fn is_out_of_range(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("22003"),
        _ => false,
    }
}
