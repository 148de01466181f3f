//! Authentication helpers for the Bitbucket client.
//!
//! Credentials come from environment variables first and fall back to the
//! user's `.netrc` file, so scripts and interactive use share one lookup.

use std::path::Path;

use anyhow::{Context, Result};
use directories::BaseDirs;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::client::BitbucketClient;
use crate::config::ClientConfig;
use crate::consts::NETRC_FALLBACK_MACHINE;
use crate::models::BitbucketAuth;
use crate::netrc::{Credentials, normalize_host, read_netrc_credentials};

/// Environment variable holding a repository, project, or workspace access
/// token
pub const ENV_BITBUCKET_ACCESS_TOKEN: &str = "BITBUCKET_ACCESS_TOKEN";
/// Environment variable holding the Bitbucket username for app passwords
pub const ENV_BITBUCKET_USERNAME: &str = "BITBUCKET_USERNAME";
/// Environment variable holding an app password
pub const ENV_BITBUCKET_APP_PASSWORD: &str = "BITBUCKET_APP_PASSWORD";

/// Retrieve Bitbucket credentials from `.netrc`, trying the API host and then
/// `bitbucket.org`.
pub fn get_bitbucket_credentials(home: &Path, api_host: &str) -> Result<Credentials> {
  let normalized_host = normalize_host(api_host);
  if let Some(creds) = read_netrc_credentials(home, &normalized_host)? {
    return Ok(creds);
  }
  if let Some(creds) = read_netrc_credentials(home, NETRC_FALLBACK_MACHINE)? {
    return Ok(creds);
  }

  Err(anyhow::anyhow!(
    "Bitbucket credentials not found. Set {ENV_BITBUCKET_ACCESS_TOKEN}, or {ENV_BITBUCKET_USERNAME} and {ENV_BITBUCKET_APP_PASSWORD}, or add credentials to .netrc for machine '{normalized_host}' or '{NETRC_FALLBACK_MACHINE}'."
  ))
}

/// Check if Bitbucket credentials are available in `.netrc`
pub fn check_bitbucket_credentials(home: &Path, api_host: &str) -> bool {
  get_bitbucket_credentials(home, api_host).is_ok()
}

/// Resolve authentication through `lookup` (a variable name to value
/// function), falling back to `.netrc` under `home`.
pub fn resolve_auth<F>(lookup: F, home: &Path, api_host: &str) -> Result<BitbucketAuth>
where
  F: Fn(&str) -> Option<String>,
{
  let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

  if let Some(token) = non_empty(ENV_BITBUCKET_ACCESS_TOKEN) {
    debug!("Using Bitbucket access token from {}", ENV_BITBUCKET_ACCESS_TOKEN);
    return Ok(BitbucketAuth::Bearer { token });
  }

  if let (Some(username), Some(app_password)) = (non_empty(ENV_BITBUCKET_USERNAME), non_empty(ENV_BITBUCKET_APP_PASSWORD))
  {
    debug!("Using Bitbucket app password for {}", username);
    return Ok(BitbucketAuth::Basic { username, app_password });
  }

  let credentials = get_bitbucket_credentials(home, api_host)?;
  debug!("Using Bitbucket credentials from .netrc for {}", credentials.username);
  Ok(BitbucketAuth::Basic {
    username: credentials.username,
    app_password: credentials.password,
  })
}

/// Creates an authenticated client from environment variables and `.netrc`.
pub fn create_bitbucket_client_from_env() -> Result<BitbucketClient> {
  let config = ClientConfig::from_env().context("Failed to read Bitbucket configuration")?;
  let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
  let auth = resolve_auth(|key| std::env::var(key).ok(), base_dirs.home_dir(), config.api_host())
    .context("Failed to get credentials")?;

  Ok(BitbucketClient::from_config(config, auth)?)
}

/// Creates a tokio runtime and an authenticated Bitbucket client.
pub fn create_bitbucket_runtime_and_client() -> Result<(Runtime, BitbucketClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_bitbucket_client_from_env()?;
  Ok((rt, client))
}
