//! The request gate shared by every scoped endpoint.
//!
//! Stages run in order and the first failure ends the request:
//! 1) the path id must parse as an integer,
//! 2) the body validator must accept the payload,
//! 3) the addressed row must exist.
//!
//! Stages 1 and 2 never touch storage. Stage 3 costs exactly one lookup.

use axum::extract::{Path, rejection::PathRejection};
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use super::{
    ARTICLE_NOT_FOUND, COMMENT_NOT_FOUND, INVALID_ARTICLE_ID, INVALID_COMMENT_ID, MISSING_FIELDS,
    storage,
    types::{NewComment, NewCommentRequest, VoteRequest},
};
use crate::api::handlers::ApiError;

/// The resource addressed by a path id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    Article,
    Comment,
}

impl Scope {
    fn invalid_id(self) -> &'static str {
        match self {
            Self::Article => INVALID_ARTICLE_ID,
            Self::Comment => INVALID_COMMENT_ID,
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Self::Article => ARTICLE_NOT_FOUND,
            Self::Comment => COMMENT_NOT_FOUND,
        }
    }

    /// Parses a path segment as a row id. Surrounding whitespace is ignored.
    pub(super) fn parse_id(self, raw: &str) -> Result<i32, ApiError> {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| ApiError::BadRequest(self.invalid_id()))
    }

    /// Like `parse_id`, but also maps a rejected path segment (e.g. invalid UTF-8) to the scope's `400`.
    pub(super) fn parse_path(
        self,
        path: Result<Path<String>, PathRejection>,
    ) -> Result<i32, ApiError> {
        match path {
            Ok(Path(raw)) => self.parse_id(&raw),
            Err(rejection) => {
                debug!("rejected path: {rejection}");
                Err(ApiError::BadRequest(self.invalid_id()))
            }
        }
    }

    async fn exists(self, pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        match self {
            Self::Article => storage::article_exists(pool, id).await,
            Self::Comment => storage::comment_exists(pool, id).await,
        }
    }
}

/// Runs the gate and returns the parsed id with the validated payload.
/// The effect is left to the caller, which must only run it on `Ok`.
pub(super) async fn admit<T>(
    pool: &PgPool,
    scope: Scope,
    path: Result<Path<String>, PathRejection>,
    validate: impl FnOnce() -> Result<T, ApiError>,
) -> Result<(i32, T), ApiError> {
    let id = scope.parse_path(path)?;
    let payload = validate()?;

    if !scope.exists(pool, id).await? {
        return Err(ApiError::NotFound(scope.not_found()));
    }

    Ok((id, payload))
}

/// Accepts endpoints without a body.
pub(super) fn no_body() -> Result<(), ApiError> {
    Ok(())
}

/// Requires non-blank `username` and `body`. A missing or unparsable JSON body counts as missing fields.
pub(super) fn new_comment(payload: Option<NewCommentRequest>) -> Result<NewComment, ApiError> {
    let payload = payload.ok_or(ApiError::BadRequest(MISSING_FIELDS))?;

    let username = payload
        .username
        .map(|username| username.trim().to_string())
        .filter(|username| !username.is_empty());
    let body = payload.body.filter(|body| !body.trim().is_empty());

    match (username, body) {
        (Some(username), Some(body)) => Ok(NewComment { username, body }),
        _ => Err(ApiError::BadRequest(MISSING_FIELDS)),
    }
}

/// Requires `inc_votes` to be a JSON integer that fits the votes column.
/// Strings, floats, booleans and `null` are rejected; negative values and zero are allowed.
pub(super) fn vote_increment(payload: Option<VoteRequest>) -> Result<i32, ApiError> {
    payload
        .and_then(|payload| payload.inc_votes)
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(|value| i32::try_from(value).ok())
        .ok_or(ApiError::BadRequest(MISSING_FIELDS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment(username: Option<&str>, body: Option<&str>) -> Option<NewCommentRequest> {
        Some(NewCommentRequest {
            username: username.map(str::to_string),
            body: body.map(str::to_string),
        })
    }

    fn vote(value: Value) -> Option<VoteRequest> {
        Some(VoteRequest {
            inc_votes: Some(value),
        })
    }

    #[test]
    fn parse_id_accepts_integers() {
        assert!(matches!(Scope::Article.parse_id("1"), Ok(1)));
        assert!(matches!(Scope::Article.parse_id(" 42 "), Ok(42)));
        assert!(matches!(Scope::Comment.parse_id("-3"), Ok(-3)));
    }

    #[test]
    fn parse_id_rejects_non_integers_per_scope() {
        for raw in ["abc", "1.5", "", "1e3", "99999999999"] {
            assert!(matches!(
                Scope::Article.parse_id(raw),
                Err(ApiError::BadRequest("Invalid article_id"))
            ));
            assert!(matches!(
                Scope::Comment.parse_id(raw),
                Err(ApiError::BadRequest("Invalid comment_id"))
            ));
        }
    }

    #[test]
    fn parse_path_uses_segment() {
        assert!(matches!(
            Scope::Article.parse_path(Ok(Path("7".to_string()))),
            Ok(7)
        ));
        assert!(matches!(
            Scope::Comment.parse_path(Ok(Path("seven".to_string()))),
            Err(ApiError::BadRequest("Invalid comment_id"))
        ));
    }

    #[test]
    fn new_comment_requires_both_fields() {
        let valid = new_comment(comment(Some("butter_bridge"), Some("hello")));
        assert_eq!(
            valid.ok(),
            Some(NewComment {
                username: "butter_bridge".to_string(),
                body: "hello".to_string(),
            })
        );

        let rejected = [
            None,
            comment(None, Some("hello")),
            comment(Some("butter_bridge"), None),
            comment(Some(""), Some("hello")),
            comment(Some("butter_bridge"), Some("   ")),
        ];
        for payload in rejected {
            assert!(matches!(
                new_comment(payload),
                Err(ApiError::BadRequest(MISSING_FIELDS))
            ));
        }
    }

    #[test]
    fn vote_increment_requires_integer() {
        assert!(matches!(vote_increment(vote(json!(1))), Ok(1)));
        assert!(matches!(vote_increment(vote(json!(-100))), Ok(-100)));
        assert!(matches!(vote_increment(vote(json!(0))), Ok(0)));

        let rejected = [
            None,
            Some(VoteRequest { inc_votes: None }),
            vote(json!("1")),
            vote(json!(1.5)),
            vote(json!(true)),
            vote(Value::Null),
            vote(json!(i64::from(i32::MAX) + 1)),
        ];
        for payload in rejected {
            assert!(matches!(
                vote_increment(payload),
                Err(ApiError::BadRequest(MISSING_FIELDS))
            ));
        }
    }
}
