//! # Bitbucket Pull Request Endpoints
//!
//! Pull request operations: create, update, fetch, list, merge, decline,
//! review state changes, and the read-only commit, activity, status, diff,
//! and patch views.

use futures::{StreamExt, TryStreamExt, stream};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, instrument, trace};
use url::Url;

use crate::body::pull_request_body;
use crate::client::BitbucketClient;
use crate::decode::{Decode, decode_page};
use crate::error::{BitbucketError, Result};
use crate::models::{Page, PullRequest, PullRequestListOptions, PullRequestOptions, StatusListOptions};
use crate::transport::Transport;

fn append_query(url: &mut Url, key: &str, value: Option<&str>) {
  if let Some(value) = value.filter(|v| !v.is_empty()) {
    url.query_pairs_mut().append_pair(key, value);
  }
}

impl<T: Transport> BitbucketClient<T> {
  /// Create a pull request
  #[instrument(skip(self, options), level = "debug")]
  pub async fn create_pull_request(
    &self,
    owner: &str,
    repo_slug: &str,
    options: &PullRequestOptions,
  ) -> Result<PullRequest> {
    info!("Creating pull request in {}/{}", owner, repo_slug);

    let url = self.pull_requests_url(owner, repo_slug, &[])?;
    let body = pull_request_body(options)?;
    let value = self.transport.execute(Method::POST, url, Some(body)).await?;

    let pr = PullRequest::decode(&value)?;
    info!("Created pull request #{}", pr.id);
    Ok(pr)
  }

  /// Update the title, description, branches, or reviewers of a pull request
  #[instrument(skip(self, options), level = "debug")]
  pub async fn update_pull_request(
    &self,
    owner: &str,
    repo_slug: &str,
    id: u64,
    options: &PullRequestOptions,
  ) -> Result<PullRequest> {
    info!("Updating pull request #{} in {}/{}", id, owner, repo_slug);

    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id])?;
    let body = pull_request_body(options)?;
    let value = self.transport.execute(Method::PUT, url, Some(body)).await?;

    PullRequest::decode(&value)
  }

  /// Get a specific pull request
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pull_request(&self, owner: &str, repo_slug: &str, id: u64) -> Result<PullRequest> {
    info!("Fetching pull request #{} from {}/{}", id, owner, repo_slug);

    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id])?;
    let value = self.transport.execute(Method::GET, url, None).await?;

    PullRequest::decode(&value)
  }

  /// List pull requests of a repository, following pagination.
  ///
  /// Entries that fail to decode are skipped.
  #[instrument(skip(self, options), level = "debug")]
  pub async fn list_pull_requests(
    &self,
    owner: &str,
    repo_slug: &str,
    options: &PullRequestListOptions,
  ) -> Result<Page<PullRequest>> {
    info!("Listing pull requests for {}/{}", owner, repo_slug);

    let mut url = self.pull_requests_url(owner, repo_slug, &[])?;
    for state in &options.states {
      append_query(&mut url, "state", Some(state.as_str()));
    }
    append_query(&mut url, "q", options.query.as_deref());
    append_query(&mut url, "sort", options.sort.as_deref());
    trace!("List URL: {}", url);

    let value = self.transport.execute_paginated(Method::GET, url, None).await?;
    let page = decode_page::<PullRequest>(&value)?;
    debug!("Found {} pull requests", page.items.len());
    Ok(page)
  }

  /// List pull requests and fetch the comments of each one
  #[instrument(skip(self, options), level = "debug")]
  pub async fn list_pull_requests_with_comments(
    &self,
    owner: &str,
    repo_slug: &str,
    options: &PullRequestListOptions,
  ) -> Result<Page<PullRequest>> {
    let page = self.list_pull_requests(owner, repo_slug, options).await?;
    self.attach_comments(owner, repo_slug, page).await
  }

  /// Extend every pull request in `page` with its comments.
  ///
  /// Up to `comment_concurrency` comment lists are fetched at once. Items
  /// keep their order, and the first failed fetch in page order fails the
  /// whole call.
  #[instrument(skip(self, page), level = "debug")]
  pub async fn attach_comments(
    &self,
    owner: &str,
    repo_slug: &str,
    page: Page<PullRequest>,
  ) -> Result<Page<PullRequest>> {
    let Page {
      page: number,
      pagelen,
      size,
      next,
      items,
    } = page;
    debug!(
      "Fetching comments for {} pull requests, {} at a time",
      items.len(),
      self.comment_concurrency
    );

    let items: Vec<PullRequest> = stream::iter(items)
      .map(|mut pr| async move {
        let comments = self.list_comments(owner, repo_slug, pr.id).await?;
        trace!("Pull request #{} has {} comments", pr.id, comments.items.len());
        pr.comments.extend(comments.items);
        Ok::<_, BitbucketError>(pr)
      })
      .buffered(self.comment_concurrency.max(1))
      .try_collect()
      .await?;

    Ok(Page {
      page: number,
      pagelen,
      size,
      next,
      items,
    })
  }

  /// List pull requests that contain a commit
  #[instrument(skip(self), level = "debug")]
  pub async fn list_pull_requests_for_commit(
    &self,
    owner: &str,
    repo_slug: &str,
    commit: &str,
  ) -> Result<Page<PullRequest>> {
    info!("Listing pull requests for commit {} in {}/{}", commit, owner, repo_slug);

    let url = self.endpoint_url(&["repositories", owner, repo_slug, "commit", commit, "pullrequests"])?;
    let value = self.transport.execute_paginated(Method::GET, url, None).await?;

    decode_page::<PullRequest>(&value)
  }

  /// Merge a pull request, using the message and merge strategy in `options`
  #[instrument(skip(self, options), level = "debug")]
  pub async fn merge_pull_request(
    &self,
    owner: &str,
    repo_slug: &str,
    id: u64,
    options: &PullRequestOptions,
  ) -> Result<PullRequest> {
    info!("Merging pull request #{} in {}/{}", id, owner, repo_slug);
    self.transition(owner, repo_slug, id, "merge", options).await
  }

  /// Decline a pull request
  #[instrument(skip(self, options), level = "debug")]
  pub async fn decline_pull_request(
    &self,
    owner: &str,
    repo_slug: &str,
    id: u64,
    options: &PullRequestOptions,
  ) -> Result<PullRequest> {
    info!("Declining pull request #{} in {}/{}", id, owner, repo_slug);
    self.transition(owner, repo_slug, id, "decline", options).await
  }

  async fn transition(
    &self,
    owner: &str,
    repo_slug: &str,
    id: u64,
    action: &str,
    options: &PullRequestOptions,
  ) -> Result<PullRequest> {
    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id, action])?;
    let body = pull_request_body(options)?;
    let value = self.transport.execute(Method::POST, url, Some(body)).await?;

    PullRequest::decode(&value)
  }

  /// Approve a pull request as the authenticated user, returning the
  /// participant entry
  #[instrument(skip(self), level = "debug")]
  pub async fn approve_pull_request(&self, owner: &str, repo_slug: &str, id: u64) -> Result<Value> {
    info!("Approving pull request #{} in {}/{}", id, owner, repo_slug);
    self.review_action(Method::POST, owner, repo_slug, id, "approve").await
  }

  /// Withdraw the authenticated user's approval
  #[instrument(skip(self), level = "debug")]
  pub async fn unapprove_pull_request(&self, owner: &str, repo_slug: &str, id: u64) -> Result<()> {
    info!("Removing approval from pull request #{} in {}/{}", id, owner, repo_slug);
    self.review_action(Method::DELETE, owner, repo_slug, id, "approve").await?;
    Ok(())
  }

  /// Request changes on a pull request as the authenticated user
  #[instrument(skip(self), level = "debug")]
  pub async fn request_changes(&self, owner: &str, repo_slug: &str, id: u64) -> Result<Value> {
    info!("Requesting changes on pull request #{} in {}/{}", id, owner, repo_slug);
    self
      .review_action(Method::POST, owner, repo_slug, id, "request-changes")
      .await
  }

  /// Withdraw the authenticated user's change request
  #[instrument(skip(self), level = "debug")]
  pub async fn unrequest_changes(&self, owner: &str, repo_slug: &str, id: u64) -> Result<()> {
    info!("Removing change request from pull request #{} in {}/{}", id, owner, repo_slug);
    self
      .review_action(Method::DELETE, owner, repo_slug, id, "request-changes")
      .await?;
    Ok(())
  }

  async fn review_action(&self, method: Method, owner: &str, repo_slug: &str, id: u64, action: &str) -> Result<Value> {
    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id, action])?;
    self.transport.execute(method, url, None).await
  }

  /// Commits on the source branch of a pull request, all pages merged
  #[instrument(skip(self), level = "debug")]
  pub async fn pull_request_commits(&self, owner: &str, repo_slug: &str, id: u64) -> Result<Value> {
    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id, "commits"])?;
    self.transport.execute_paginated(Method::GET, url, None).await
  }

  /// Activity log of a single pull request
  #[instrument(skip(self), level = "debug")]
  pub async fn pull_request_activity(&self, owner: &str, repo_slug: &str, id: u64) -> Result<Value> {
    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id, "activity"])?;
    self.transport.execute(Method::GET, url, None).await
  }

  /// Pull request activity across a repository, all pages merged
  #[instrument(skip(self), level = "debug")]
  pub async fn repository_activity(&self, owner: &str, repo_slug: &str) -> Result<Value> {
    let url = self.pull_requests_url(owner, repo_slug, &["activity"])?;
    self.transport.execute_paginated(Method::GET, url, None).await
  }

  /// Commit statuses reported for a pull request
  #[instrument(skip(self, options), level = "debug")]
  pub async fn pull_request_statuses(
    &self,
    owner: &str,
    repo_slug: &str,
    id: u64,
    options: &StatusListOptions,
  ) -> Result<Value> {
    let id = id.to_string();
    let mut url = self.pull_requests_url(owner, repo_slug, &[&id, "statuses"])?;
    append_query(&mut url, "q", options.query.as_deref());
    append_query(&mut url, "sort", options.sort.as_deref());

    self.transport.execute_paginated(Method::GET, url, None).await
  }

  /// Unified diff of a pull request
  #[instrument(skip(self), level = "debug")]
  pub async fn pull_request_diff(&self, owner: &str, repo_slug: &str, id: u64) -> Result<String> {
    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id, "diff"])?;
    self.transport.execute_raw(Method::GET, url, None).await
  }

  /// Patch series of a pull request
  #[instrument(skip(self), level = "debug")]
  pub async fn pull_request_patch(&self, owner: &str, repo_slug: &str, id: u64) -> Result<String> {
    let id = id.to_string();
    let url = self.pull_requests_url(owner, repo_slug, &[&id, "patch"])?;
    self.transport.execute_raw(Method::GET, url, None).await
  }
}
