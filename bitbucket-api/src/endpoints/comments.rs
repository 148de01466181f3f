//! # Bitbucket Pull Request Comment Endpoints
//!
//! Create, update, delete, fetch, and list comments on a pull request.

use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::body::comment_body;
use crate::client::BitbucketClient;
use crate::decode::{Decode, decode_page};
use crate::error::Result;
use crate::models::{Page, PullRequestComment, PullRequestCommentOptions};
use crate::transport::Transport;

impl<T: Transport> BitbucketClient<T> {
  /// Add a comment, or a reply when `options.parent` is set
  #[instrument(skip(self, options), level = "debug")]
  pub async fn add_comment(
    &self,
    owner: &str,
    repo_slug: &str,
    pr_id: u64,
    options: &PullRequestCommentOptions,
  ) -> Result<PullRequestComment> {
    info!("Adding comment to pull request #{} in {}/{}", pr_id, owner, repo_slug);

    let pr_id = pr_id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&pr_id, "comments"])?;
    let body = comment_body(options)?;
    let value = self.transport.execute(Method::POST, url, Some(body)).await?;

    let comment = PullRequestComment::decode(&value)?;
    debug!("Created comment {}", comment.id);
    Ok(comment)
  }

  /// Replace the content of a comment
  #[instrument(skip(self, options), level = "debug")]
  pub async fn update_comment(
    &self,
    owner: &str,
    repo_slug: &str,
    pr_id: u64,
    comment_id: u64,
    options: &PullRequestCommentOptions,
  ) -> Result<PullRequestComment> {
    info!("Updating comment {} on pull request #{}", comment_id, pr_id);

    let (pr_id, comment_id) = (pr_id.to_string(), comment_id.to_string());
    let url = self.pull_requests_url(owner, repo_slug, &[&pr_id, "comments", &comment_id])?;
    let body = comment_body(options)?;
    let value = self.transport.execute(Method::PUT, url, Some(body)).await?;

    PullRequestComment::decode(&value)
  }

  /// Delete a comment
  #[instrument(skip(self), level = "debug")]
  pub async fn delete_comment(&self, owner: &str, repo_slug: &str, pr_id: u64, comment_id: u64) -> Result<()> {
    info!("Deleting comment {} on pull request #{}", comment_id, pr_id);

    let (pr_id, comment_id) = (pr_id.to_string(), comment_id.to_string());
    let url = self.pull_requests_url(owner, repo_slug, &[&pr_id, "comments", &comment_id])?;
    self.transport.execute(Method::DELETE, url, None).await?;

    Ok(())
  }

  /// Get a single comment
  #[instrument(skip(self), level = "debug")]
  pub async fn get_comment(
    &self,
    owner: &str,
    repo_slug: &str,
    pr_id: u64,
    comment_id: u64,
  ) -> Result<PullRequestComment> {
    let (pr_id, comment_id) = (pr_id.to_string(), comment_id.to_string());
    let url = self.pull_requests_url(owner, repo_slug, &[&pr_id, "comments", &comment_id])?;
    let value = self.transport.execute(Method::GET, url, None).await?;

    PullRequestComment::decode(&value)
  }

  /// List the comments of a pull request, following pagination.
  ///
  /// Comments that fail to decode are skipped.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_comments(&self, owner: &str, repo_slug: &str, pr_id: u64) -> Result<Page<PullRequestComment>> {
    let pr_id = pr_id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&pr_id, "comments"])?;
    let value = self.transport.execute_paginated(Method::GET, url, None).await?;

    decode_page::<PullRequestComment>(&value)
  }
}
