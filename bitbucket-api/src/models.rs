//! # Bitbucket Models
//!
//! Typed pull request, comment, and page entities produced by the decoders,
//! plus the option structures accepted by the endpoint methods.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Represents Bitbucket authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub enum BitbucketAuth {
  /// HTTP basic authentication with an app password
  Basic { username: String, app_password: String },
  /// Repository, project, or workspace access token
  Bearer { token: String },
}

impl std::fmt::Debug for BitbucketAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Basic { username, .. } => f
        .debug_struct("Basic")
        .field("username", username)
        .field("app_password", &"<redacted>")
        .finish(),
      Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
    }
  }
}

/// Represents a Bitbucket user (author, reviewer, or comment author)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
  pub display_name: String,
  pub uuid: String,
  pub account_id: String,
  pub nickname: String,
}

/// Repository reference embedded in a pull request endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRef {
  pub full_name: String,
  pub name: String,
  pub uuid: String,
}

/// Source or destination side of a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestEndpoint {
  /// Branch name
  pub branch: String,
  pub repository: RepositoryRef,
  /// Commit hash
  pub commit: String,
}

/// A user's involvement in a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participant {
  pub user: User,
  /// `PARTICIPANT` or `REVIEWER`
  pub role: String,
  pub approved: bool,
  /// `approved`, `changes_requested`, or empty
  pub state: String,
}

/// Represents a Bitbucket pull request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullRequest {
  pub id: u64,
  pub title: String,
  pub description: String,
  pub author: User,
  pub draft: bool,
  pub close_source_branch: bool,
  /// `OPEN`, `MERGED`, `DECLINED`, or `SUPERSEDED`
  pub state: String,
  pub source: PullRequestEndpoint,
  pub destination: PullRequestEndpoint,
  pub reviewers: Vec<User>,
  pub participants: Vec<Participant>,
  pub comment_count: u64,
  pub task_count: u64,
  /// Hash of the merge commit once merged
  pub merge_commit: Option<String>,
  /// Reason given when the pull request was declined
  pub reason: String,
  /// Filled in by [`crate::BitbucketClient::attach_comments`]
  pub comments: Vec<PullRequestComment>,
  pub created_on: Option<DateTime<FixedOffset>>,
  pub updated_on: Option<DateTime<FixedOffset>>,
}

/// Raw, markup, and rendered forms of a comment body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentContent {
  pub raw: String,
  pub markup: String,
  pub html: String,
}

/// File and line anchor of an inline comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineAnchor {
  pub path: String,
  pub from: Option<u64>,
  pub to: Option<u64>,
}

/// Represents a comment on a pull request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullRequestComment {
  pub id: u64,
  pub content: CommentContent,
  /// Identifier of the comment this one replies to
  pub parent: Option<u64>,
  pub user: User,
  pub deleted: bool,
  pub inline: Option<InlineAnchor>,
  pub created_on: Option<DateTime<FixedOffset>>,
  pub updated_on: Option<DateTime<FixedOffset>>,
}

/// One fetched page of a paginated collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub page: u64,
  pub pagelen: u64,
  pub size: u64,
  /// Link to the following page, if the server reported one
  pub next: Option<String>,
  pub items: Vec<T>,
}

impl<T> Default for Page<T> {
  fn default() -> Self {
    Self {
      page: 0,
      pagelen: 0,
      size: 0,
      next: None,
      items: Vec::new(),
    }
  }
}

/// Merge strategies accepted by the merge endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
  MergeCommit,
  Squash,
  FastForward,
}

/// Fields for creating, updating, merging, or declining a pull request
///
/// Unset optional values are left out of the nested `source`/`destination`
/// objects; top-level keys always carry a value.
#[derive(Debug, Clone, Default)]
pub struct PullRequestOptions {
  pub title: Option<String>,
  pub description: Option<String>,
  /// Merge commit message
  pub message: Option<String>,
  pub close_source_branch: bool,
  pub draft: bool,
  pub source_branch: Option<String>,
  /// `workspace/repo_slug` of a fork to merge from
  pub source_repository: Option<String>,
  pub source_commit: Option<String>,
  pub destination_branch: Option<String>,
  pub destination_repository: Option<String>,
  pub destination_commit: Option<String>,
  /// Reviewer UUIDs
  pub reviewers: Vec<String>,
  pub merge_strategy: Option<MergeStrategy>,
}

/// Filters for listing pull requests
#[derive(Debug, Clone, Default)]
pub struct PullRequestListOptions {
  /// Each state is sent as its own `state` parameter
  pub states: Vec<String>,
  /// Bitbucket query language filter (`q`)
  pub query: Option<String>,
  pub sort: Option<String>,
}

/// Filters for listing commit statuses of a pull request
#[derive(Debug, Clone, Default)]
pub struct StatusListOptions {
  pub query: Option<String>,
  pub sort: Option<String>,
}

/// Fields for creating or updating a pull request comment
#[derive(Debug, Clone, Default)]
pub struct PullRequestCommentOptions {
  /// Raw markdown content
  pub content: String,
  /// Comment being replied to
  pub parent: Option<u64>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_auth_debug_redacts_secrets() {
    let auth = BitbucketAuth::Basic {
      username: "test_user".to_string(),
      app_password: "secret".to_string(),
    };
    let rendered = format!("{auth:?}");
    assert!(rendered.contains("test_user"));
    assert!(!rendered.contains("secret"));

    let auth = BitbucketAuth::Bearer {
      token: "token-value".to_string(),
    };
    assert!(!format!("{auth:?}").contains("token-value"));
  }

  #[test]
  fn test_page_default_is_empty() {
    let page: Page<PullRequest> = Page::default();
    assert_eq!(page.page, 0);
    assert_eq!(page.pagelen, 0);
    assert_eq!(page.size, 0);
    assert!(page.next.is_none());
    assert!(page.items.is_empty());
  }

  #[test]
  fn test_merge_strategy_serialization() {
    assert_eq!(
      serde_json::to_value(MergeStrategy::FastForward).unwrap(),
      serde_json::json!("fast_forward")
    );
    assert_eq!(
      serde_json::to_value(MergeStrategy::MergeCommit).unwrap(),
      serde_json::json!("merge_commit")
    );
  }
}
