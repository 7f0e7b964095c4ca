//! # Newsdesk (News Aggregation API)
//!
//! `newsdesk` serves topics, articles, comments and users from PostgreSQL over
//! a small JSON REST surface rooted at `/api`.
//!
//! ## Articles
//!
//! Articles carry a derived `comment_count`, computed at read time by joining
//! comments and never stored. The listing endpoint accepts `sort_by`, `order`
//! and `topic`; sort and order values are matched against fixed allow-lists
//! before anything reaches the `ORDER BY` clause, and the listing never exposes
//! the article body.
//!
//! ## Request gate
//!
//! Every scoped endpoint runs the same three stages:
//!
//! 1. Syntactic validation of path and body parameters (`400`).
//! 2. Existence check of the addressed article or comment (`404`).
//! 3. A single SQL statement that performs the effect.
//!
//! Any stage may short-circuit. Storage failures are logged and surface as a
//! generic `500`.

pub mod api;
pub mod cli;
pub mod seed;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }
}
