//! # Client Configuration
//!
//! Settings for the Bitbucket client, read from the environment with
//! defaults suitable for Bitbucket Cloud.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::consts::{API_BASE_URL, DEFAULT_COMMENT_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Environment variable overriding the API base URL
pub const ENV_BITBUCKET_API_URL: &str = "BITBUCKET_API_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_BITBUCKET_TIMEOUT_SECS: &str = "BITBUCKET_TIMEOUT_SECS";
/// Environment variable holding the requested page length
pub const ENV_BITBUCKET_PAGELEN: &str = "BITBUCKET_PAGELEN";
/// Environment variable limiting how many pages a list call follows
pub const ENV_BITBUCKET_MAX_PAGES: &str = "BITBUCKET_MAX_PAGES";
/// Environment variable holding the comment fetch concurrency
pub const ENV_BITBUCKET_COMMENT_CONCURRENCY: &str = "BITBUCKET_COMMENT_CONCURRENCY";

static DEFAULT_BASE_URL: LazyLock<Url> =
  LazyLock::new(|| Url::parse(API_BASE_URL).expect("Failed to parse default Bitbucket API URL"));

/// Settings shared by the client and its HTTP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// API root, e.g. `https://api.bitbucket.org/2.0`
  pub base_url: Url,
  pub request_timeout: Duration,
  /// `pagelen` sent with paginated requests; server default when unset
  pub page_length: Option<u32>,
  /// Maximum number of pages followed per list call; all pages when unset
  pub max_pages: Option<usize>,
  /// Comment lists fetched at once when enriching pull requests
  pub comment_concurrency: usize,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.clone(),
      request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
      page_length: None,
      max_pages: None,
      comment_concurrency: DEFAULT_COMMENT_CONCURRENCY,
    }
  }
}

impl ClientConfig {
  /// Configuration pointing at a different API root (mock servers, proxies)
  pub fn with_base_url(base_url: &str) -> Result<Self> {
    Ok(Self {
      base_url: parse_base_url(base_url)?,
      ..Self::default()
    })
  }

  /// Read the configuration from process environment variables
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Read the configuration through `lookup`, which maps a variable name to
  /// its value.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(base_url) = lookup(ENV_BITBUCKET_API_URL) {
      config.base_url =
        parse_base_url(&base_url).with_context(|| format!("Invalid value for {ENV_BITBUCKET_API_URL}"))?;
    }
    if let Some(secs) = parse_number::<u64>(&lookup, ENV_BITBUCKET_TIMEOUT_SECS)? {
      config.request_timeout = Duration::from_secs(secs);
    }
    config.page_length = parse_number(&lookup, ENV_BITBUCKET_PAGELEN)?;
    config.max_pages = parse_number(&lookup, ENV_BITBUCKET_MAX_PAGES)?;
    if let Some(concurrency) = parse_number::<usize>(&lookup, ENV_BITBUCKET_COMMENT_CONCURRENCY)? {
      if concurrency == 0 {
        return Err(anyhow::anyhow!("{ENV_BITBUCKET_COMMENT_CONCURRENCY} must be at least 1"));
      }
      config.comment_concurrency = concurrency;
    }

    Ok(config)
  }

  /// Host of the API root, used to look up `.netrc` credentials
  pub fn api_host(&self) -> &str {
    self.base_url.host_str().unwrap_or_default()
  }
}

fn parse_number<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match lookup(key) {
    Some(raw) if !raw.trim().is_empty() => {
      let value = raw
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value '{raw}' for {key}"))?;
      Ok(Some(value))
    }
    _ => Ok(None),
  }
}

/// Parse an API root, assuming `https://` when no scheme is given and
/// dropping a trailing slash.
pub fn parse_base_url(raw: &str) -> Result<Url> {
  let trimmed = raw.trim().trim_end_matches('/');
  let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).with_context(|| format!("Failed to parse Bitbucket URL '{raw}'"))?;
  if url.cannot_be_a_base() || url.host_str().is_none() {
    return Err(anyhow::anyhow!("Bitbucket URL '{raw}' has no host"));
  }

  Ok(url)
}
