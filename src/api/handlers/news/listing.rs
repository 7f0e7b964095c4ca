//! Allow-listed sort/order composition for the article listing.
//!
//! `sort_by` and `order` end up inside the generated `ORDER BY` clause, so they
//! are never interpolated as given. Each accepted value maps to a variant whose
//! SQL fragment is a static string; anything else is rejected before the query
//! is built.

use axum::extract::{Query, rejection::QueryRejection};
use tracing::debug;

use super::{INVALID_QUERY, types::ArticleQuery};
use crate::api::handlers::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum SortColumn {
    ArticleId,
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
    ArticleImgUrl,
}

impl SortColumn {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "article_id" => Some(Self::ArticleId),
            "title" => Some(Self::Title),
            "topic" => Some(Self::Topic),
            "author" => Some(Self::Author),
            "created_at" => Some(Self::CreatedAt),
            "votes" => Some(Self::Votes),
            "comment_count" => Some(Self::CommentCount),
            "article_img_url" => Some(Self::ArticleImgUrl),
            _ => None,
        }
    }

    /// `comment_count` is the aggregate's output name; the rest are stored columns.
    pub(super) fn as_sql(self) -> &'static str {
        match self {
            Self::ArticleId => "articles.article_id",
            Self::Title => "articles.title",
            Self::Topic => "articles.topic",
            Self::Author => "articles.author",
            Self::CreatedAt => "articles.created_at",
            Self::Votes => "articles.votes",
            Self::CommentCount => "comment_count",
            Self::ArticleImgUrl => "articles.article_img_url",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    pub(super) fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A validated article listing request.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Listing {
    pub(super) sort_by: SortColumn,
    pub(super) order: SortOrder,
    pub(super) topic: Option<String>,
}

impl Listing {
    /// Validates raw query parameters against the allow-lists.
    /// Absent values fall back to `created_at DESC`; an empty `topic` means no filter.
    pub(super) fn from_query(query: ArticleQuery) -> Result<Self, ApiError> {
        let sort_by = match query.sort_by.as_deref() {
            None => SortColumn::default(),
            Some(value) => SortColumn::parse(value).ok_or(ApiError::BadRequest(INVALID_QUERY))?,
        };
        let order = match query.order.as_deref() {
            None => SortOrder::default(),
            Some(value) => SortOrder::parse(value).ok_or(ApiError::BadRequest(INVALID_QUERY))?,
        };
        let topic = query.topic.filter(|topic| !topic.is_empty());

        Ok(Self {
            sort_by,
            order,
            topic,
        })
    }

    /// Same as `from_query`, for the extractor result. A query string that does not
    /// deserialize (e.g. a repeated `sort_by`) is an invalid query as well.
    pub(super) fn from_extracted(
        query: Result<Query<ArticleQuery>, QueryRejection>,
    ) -> Result<Self, ApiError> {
        match query {
            Ok(Query(query)) => Self::from_query(query),
            Err(rejection) => {
                debug!("rejected query string: {rejection}");
                Err(ApiError::BadRequest(INVALID_QUERY))
            }
        }
    }

    /// Builds the `ORDER BY` clause from static fragments only.
    /// Ties fall back to `article_id` so the output order is stable.
    pub(super) fn order_by(&self) -> String {
        format!(
            "ORDER BY {} {}, articles.article_id ASC",
            self.sort_by.as_sql(),
            self.order.as_sql()
        )
    }
}
