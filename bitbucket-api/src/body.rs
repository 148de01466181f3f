//! # Request Bodies
//!
//! Builds the JSON payloads sent when creating, updating, merging, or
//! declining pull requests and when creating or updating comments.

use serde::Serialize;

use crate::error::Result;
use crate::models::{MergeStrategy, PullRequestCommentOptions, PullRequestOptions};

#[derive(Debug, Serialize)]
struct Named<'a> {
  name: &'a str,
}

#[derive(Debug, Serialize)]
struct FullName<'a> {
  full_name: &'a str,
}

#[derive(Debug, Serialize)]
struct Hash<'a> {
  hash: &'a str,
}

/// `source` / `destination` object; empty values are left out and nothing
/// set serializes to `{}`
#[derive(Debug, Default, Serialize)]
struct EndpointBody<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  branch: Option<Named<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  repository: Option<FullName<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  commit: Option<Hash<'a>>,
}

impl<'a> EndpointBody<'a> {
  fn new(branch: Option<&'a str>, repository: Option<&'a str>, commit: Option<&'a str>) -> Self {
    let supplied = |value: &&str| !value.is_empty();
    Self {
      branch: branch.filter(supplied).map(|name| Named { name }),
      repository: repository.filter(supplied).map(|full_name| FullName { full_name }),
      commit: commit.filter(supplied).map(|hash| Hash { hash }),
    }
  }
}

#[derive(Debug, Serialize)]
struct Reviewer<'a> {
  uuid: &'a str,
}

#[derive(Debug, Serialize)]
struct PullRequestBody<'a> {
  source: EndpointBody<'a>,
  destination: EndpointBody<'a>,
  reviewers: Vec<Reviewer<'a>>,
  title: &'a str,
  description: &'a str,
  message: &'a str,
  close_source_branch: bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  draft: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  merge_strategy: Option<MergeStrategy>,
}

#[derive(Debug, Serialize)]
struct RawContent<'a> {
  raw: &'a str,
}

#[derive(Debug, Serialize)]
struct ParentRef {
  id: u64,
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
  content: RawContent<'a>,
  #[serde(skip_serializing_if = "Option::is_none")]
  parent: Option<ParentRef>,
}

/// Build the body for create, update, merge, and decline requests.
///
/// `source`, `destination`, `reviewers`, `title`, `description`, `message`,
/// and `close_source_branch` are always present. `draft` is only sent when
/// true and `merge_strategy` only when set.
pub fn pull_request_body(options: &PullRequestOptions) -> Result<String> {
  let body = PullRequestBody {
    source: EndpointBody::new(
      options.source_branch.as_deref(),
      options.source_repository.as_deref(),
      options.source_commit.as_deref(),
    ),
    destination: EndpointBody::new(
      options.destination_branch.as_deref(),
      options.destination_repository.as_deref(),
      options.destination_commit.as_deref(),
    ),
    reviewers: options.reviewers.iter().map(|uuid| Reviewer { uuid }).collect(),
    title: options.title.as_deref().unwrap_or_default(),
    description: options.description.as_deref().unwrap_or_default(),
    message: options.message.as_deref().unwrap_or_default(),
    close_source_branch: options.close_source_branch,
    draft: options.draft,
    merge_strategy: options.merge_strategy,
  };

  Ok(serde_json::to_string(&body)?)
}

/// Build the body for comment create and update requests
pub fn comment_body(options: &PullRequestCommentOptions) -> Result<String> {
  let body = CommentBody {
    content: RawContent { raw: &options.content },
    parent: options.parent.map(|id| ParentRef { id }),
  };

  Ok(serde_json::to_string(&body)?)
}
