pub mod seed;
pub mod server;

mod run;

use anyhow::{Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Seed(seed::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Returns the DSN with `password` injected, or unchanged when no password is given.
///
/// # Errors
/// Returns an error if the DSN is not a valid URL or cannot carry credentials.
pub fn database_url(dsn: &str, password: Option<&SecretString>) -> Result<String> {
    let Some(password) = password else {
        return Ok(dsn.to_string());
    };

    let mut dsn = Url::parse(dsn)?;

    dsn.set_password(Some(password.expose_secret()))
        .map_err(|()| anyhow!("Error setting password"))?;

    Ok(dsn.to_string())
}
