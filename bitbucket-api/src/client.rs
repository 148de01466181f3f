//! # Bitbucket Client
//!
//! The client that endpoint methods hang off, holding the transport and the
//! API root every request URL is built from.

use url::Url;

use crate::config::ClientConfig;
use crate::error::{BitbucketError, Result};
use crate::models::BitbucketAuth;
use crate::transport::{HttpTransport, Transport};

/// Represents a Bitbucket Cloud API client
pub struct BitbucketClient<T: Transport = HttpTransport> {
  pub(crate) transport: T,
  pub(crate) base_url: Url,
  pub(crate) comment_concurrency: usize,
}

impl BitbucketClient {
  /// Create a client for Bitbucket Cloud with default settings
  pub fn new(auth: BitbucketAuth) -> Result<Self> {
    Self::from_config(ClientConfig::default(), auth)
  }

  /// Create a client using the base URL, timeout, and pagination settings of
  /// `config`
  pub fn from_config(config: ClientConfig, auth: BitbucketAuth) -> Result<Self> {
    let transport = HttpTransport::new(auth, &config)?;
    Ok(Self::with_transport(transport, &config))
  }
}

impl<T: Transport> BitbucketClient<T> {
  /// Create a client that sends its requests through `transport`
  pub fn with_transport(transport: T, config: &ClientConfig) -> Self {
    Self {
      transport,
      base_url: config.base_url.clone(),
      comment_concurrency: config.comment_concurrency.max(1),
    }
  }

  /// API root requests are built from
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Build a URL by appending percent-encoded path segments to the API root
  pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| BitbucketError::InvalidBaseUrl(self.base_url.to_string()))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// URL of `/repositories/{owner}/{repo_slug}/pullrequests/...`
  pub(crate) fn pull_requests_url(&self, owner: &str, repo_slug: &str, rest: &[&str]) -> Result<Url> {
    let mut segments = vec!["repositories", owner, repo_slug, "pullrequests"];
    segments.extend_from_slice(rest);
    self.endpoint_url(&segments)
  }
}

/// Create a Bitbucket client from an app password
pub fn create_bitbucket_client(username: &str, app_password: &str) -> Result<BitbucketClient> {
  let auth = BitbucketAuth::Basic {
    username: username.to_string(),
    app_password: app_password.to_string(),
  };

  BitbucketClient::new(auth)
}
