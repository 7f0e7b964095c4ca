use crate::{cli::actions::database_url, seed};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub dsn: String,
    pub db_password: Option<SecretString>,
}

/// Execute the seed action.
/// # Errors
/// Returns an error if the DSN is invalid or any schema or data statement fails.
pub async fn execute(args: Args) -> Result<()> {
    let dsn = database_url(&args.dsn, args.db_password.as_ref())?;

    seed::run(&dsn).await
}
