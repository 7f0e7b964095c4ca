use crate::{api, cli::actions::database_url};
use anyhow::Result;
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub db_password: Option<SecretString>,
    pub max_connections: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the DSN is invalid, the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let dsn = database_url(&args.dsn, args.db_password.as_ref())?;

    let config = api::PoolConfig {
        max_connections: args.max_connections,
    };

    debug!("Pool config: {:?}", config);

    api::new(args.port, dsn, config).await
}
