//! Topic, article, comment and user endpoints.
//!
//! This module is split into small route-focused files plus a shared storage
//! layer. Handler modules only parse inputs and map the high-level flow,
//! `gate` owns the validate/exists sequence shared by every scoped endpoint,
//! `listing` turns query strings into an allow-listed `ORDER BY`, and
//! `storage` owns the SQL and response shaping.
//!
//! Flow Overview:
//! 1) Parse the path id and validate the JSON body (`400` on failure).
//! 2) Confirm the addressed article or comment exists (`404` on failure).
//! 3) Run a single SQL statement and wrap the result in its envelope.

pub(crate) mod articles;
pub(crate) mod comments;
pub(crate) mod topics;
pub(crate) mod users;
mod gate;
mod listing;
mod storage;
pub(crate) mod types;

const INVALID_ARTICLE_ID: &str = "Invalid article_id";
const INVALID_COMMENT_ID: &str = "Invalid comment_id";
const INVALID_QUERY: &str = "Invalid query";
const MISSING_FIELDS: &str = "Bad request: missing required fields";
const VOTES_OUT_OF_RANGE: &str = "Bad request: votes out of range";
const ARTICLE_NOT_FOUND: &str = "Article not found";
const COMMENT_NOT_FOUND: &str = "Comment not found";
const USER_NOT_FOUND: &str = "User not found";
