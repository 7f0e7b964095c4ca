//! Schema reset and sample data loading.
//!
//! The SQL lives in `sql/` and is embedded at compile time, so the binary can
//! seed a database without access to the source tree.

use anyhow::{Context, Result};
use sqlx::{Connection, PgConnection};
use tracing::{debug, info};

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));
pub const SEED_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/seed.sql"));

/// Drops and recreates every table, then loads the sample data.
///
/// # Errors
/// Returns an error if the connection fails or any statement is rejected.
pub async fn run(dsn: &str) -> Result<()> {
    let mut connection = PgConnection::connect(dsn)
        .await
        .context("Failed to connect to database for seeding")?;

    apply(&mut connection, SCHEMA_SQL)
        .await
        .context("Failed to apply schema")?;
    apply(&mut connection, SEED_SQL)
        .await
        .context("Failed to load seed data")?;

    info!("Database seeded");

    Ok(())
}

/// Executes each statement of `sql` in order on a single connection.
///
/// # Errors
/// Returns an error naming the first statement that fails.
pub async fn apply(connection: &mut PgConnection, sql: &str) -> Result<()> {
    for (index, statement) in split_sql_statements(sql).iter().enumerate() {
        debug!("Executing statement {}", index + 1);
        sqlx::query(statement)
            .execute(&mut *connection)
            .await
            .with_context(|| format!("failed to execute statement {}", index + 1))?;
    }

    Ok(())
}

/// Splits a SQL file into statements, assuming each one ends with `;` at the end of a line.
/// Comment-only chunks are dropped.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_inline_semicolons() {
        let sql = "-- header\nINSERT INTO t (a) VALUES ('x; y');\n\nSELECT 1;\n";
        let statements = split_sql_statements(sql);
        assert_eq!(
            statements,
            vec!["INSERT INTO t (a) VALUES ('x; y');", "SELECT 1;"]
        );
    }

    #[test]
    fn split_keeps_trailing_statement_without_semicolon() {
        let statements = split_sql_statements("SELECT 1;\nSELECT 2");
        assert_eq!(statements, vec!["SELECT 1;", "SELECT 2"]);
    }

    #[test]
    fn embedded_sql_is_split_into_statements() {
        let schema = split_sql_statements(SCHEMA_SQL);
        assert!(schema.iter().any(|s| s.starts_with("CREATE TABLE articles")));
        assert!(schema.iter().any(|s| s.starts_with("CREATE TABLE comments")));

        let seed = split_sql_statements(SEED_SQL);
        assert_eq!(seed.len(), 4);
        assert!(seed.iter().all(|s| s.starts_with("INSERT INTO")));
    }
}
