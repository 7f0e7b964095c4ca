//! Map parsed command-line arguments to an [`Action`].
//!
//! Without a subcommand the API server starts; `seed` resets and loads the
//! database instead.

use crate::cli::actions::{Action, seed, server};
use crate::cli::commands::{
    ARG_DB_PASSWORD, ARG_DSN, ARG_MAX_CONNECTIONS, ARG_PORT, CMD_SEED,
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    if let Some(seed_matches) = matches.subcommand_matches(CMD_SEED) {
        let (dsn, db_password) = database_args(seed_matches)?;
        return Ok(Action::Seed(seed::Args { dsn, db_password }));
    }

    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let max_connections = matches
        .get_one::<u32>(ARG_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(5);
    let (dsn, db_password) = database_args(matches)?;

    Ok(Action::Server(server::Args {
        port,
        dsn,
        db_password,
        max_connections,
    }))
}

fn database_args(matches: &clap::ArgMatches) -> Result<(String, Option<SecretString>)> {
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let db_password = matches
        .get_one::<String>(ARG_DB_PASSWORD)
        .map(|password| SecretString::from(password.clone()));

    Ok((dsn, db_password))
}
