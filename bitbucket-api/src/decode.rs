//! # Response Decoding
//!
//! Converts loosely-typed JSON returned by the Bitbucket API into the typed
//! entities in [`crate::models`].
//!
//! Single entities fail on the `{"type": "error"}` envelope and on malformed
//! timestamps. Every other wrong-typed or missing field is left at its zero
//! value. Pages skip entities that fail to decode and keep the rest.

use serde_json::Value;
use tracing::{trace, warn};

use crate::error::{BitbucketError, Result};
use crate::json::{
  Object, array_field, as_object, bool_field, nested_str, number_as_u64, object_field, str_field, string_field,
  timestamp_field, u64_field,
};
use crate::models::{
  CommentContent, InlineAnchor, Page, Participant, PullRequest, PullRequestComment, PullRequestEndpoint, RepositoryRef,
  User,
};

/// Types that can be decoded from one JSON entity returned by the API
pub trait Decode: Sized {
  /// Decode `value`, failing on a non-object, an error envelope, or a
  /// malformed timestamp.
  fn decode(value: &Value) -> Result<Self>;
}

/// Fail with [`BitbucketError::RemoteApi`] if `obj` is the error envelope
fn check_error_envelope(obj: &Object) -> Result<()> {
  if str_field(obj, "type") != Some("error") {
    return Ok(());
  }

  let error = object_field(obj, "error");
  let message = error
    .and_then(|e| str_field(e, "message"))
    .unwrap_or("unknown error")
    .to_string();
  let detail = error.and_then(|e| str_field(e, "detail")).map(str::to_string);

  Err(BitbucketError::RemoteApi { message, detail })
}

fn decode_user(obj: Option<&Object>) -> User {
  let Some(obj) = obj else {
    return User::default();
  };

  User {
    display_name: string_field(obj, "display_name"),
    uuid: string_field(obj, "uuid"),
    account_id: string_field(obj, "account_id"),
    nickname: string_field(obj, "nickname"),
  }
}

fn decode_users(obj: &Object, key: &str) -> Vec<User> {
  array_field(obj, key)
    .map(|values| values.iter().filter_map(Value::as_object).map(|u| decode_user(Some(u))).collect())
    .unwrap_or_default()
}

fn decode_endpoint(obj: Option<&Object>) -> PullRequestEndpoint {
  let Some(obj) = obj else {
    return PullRequestEndpoint::default();
  };

  let repository = object_field(obj, "repository")
    .map(|repo| RepositoryRef {
      full_name: string_field(repo, "full_name"),
      name: string_field(repo, "name"),
      uuid: string_field(repo, "uuid"),
    })
    .unwrap_or_default();

  PullRequestEndpoint {
    branch: nested_str(obj, &["branch", "name"]).unwrap_or_default().to_string(),
    repository,
    commit: nested_str(obj, &["commit", "hash"]).unwrap_or_default().to_string(),
  }
}

fn decode_participants(obj: &Object) -> Vec<Participant> {
  let Some(values) = array_field(obj, "participants") else {
    return Vec::new();
  };

  values
    .iter()
    .filter_map(Value::as_object)
    .map(|p| Participant {
      user: decode_user(object_field(p, "user")),
      role: string_field(p, "role"),
      approved: bool_field(p, "approved"),
      state: string_field(p, "state"),
    })
    .collect()
}

impl Decode for PullRequest {
  fn decode(value: &Value) -> Result<Self> {
    let obj = as_object(value)?;
    check_error_envelope(obj)?;

    let pr = PullRequest {
      id: u64_field(obj, "id").unwrap_or_default(),
      title: string_field(obj, "title"),
      description: string_field(obj, "description"),
      author: decode_user(object_field(obj, "author")),
      draft: bool_field(obj, "draft"),
      close_source_branch: bool_field(obj, "close_source_branch"),
      state: string_field(obj, "state"),
      source: decode_endpoint(object_field(obj, "source")),
      destination: decode_endpoint(object_field(obj, "destination")),
      reviewers: decode_users(obj, "reviewers"),
      participants: decode_participants(obj),
      comment_count: u64_field(obj, "comment_count").unwrap_or_default(),
      task_count: u64_field(obj, "task_count").unwrap_or_default(),
      merge_commit: nested_str(obj, &["merge_commit", "hash"]).map(str::to_string),
      reason: string_field(obj, "reason"),
      comments: Vec::new(),
      created_on: timestamp_field(obj, "created_on")?,
      updated_on: timestamp_field(obj, "updated_on")?,
    };

    trace!("Decoded pull request #{}", pr.id);
    Ok(pr)
  }
}

/// The API nests the parent as `{"id": ..}`; a bare number is accepted too.
fn decode_parent(obj: &Object) -> Option<u64> {
  match obj.get("parent")? {
    Value::Object(parent) => u64_field(parent, "id"),
    other => number_as_u64(other),
  }
}

fn decode_inline(obj: &Object) -> Option<InlineAnchor> {
  let inline = object_field(obj, "inline")?;
  Some(InlineAnchor {
    path: string_field(inline, "path"),
    from: u64_field(inline, "from"),
    to: u64_field(inline, "to"),
  })
}

impl Decode for PullRequestComment {
  fn decode(value: &Value) -> Result<Self> {
    let obj = as_object(value)?;
    check_error_envelope(obj)?;

    let content = object_field(obj, "content")
      .map(|c| CommentContent {
        raw: string_field(c, "raw"),
        markup: string_field(c, "markup"),
        html: string_field(c, "html"),
      })
      .unwrap_or_default();

    let comment = PullRequestComment {
      id: u64_field(obj, "id").unwrap_or_default(),
      content,
      parent: decode_parent(obj),
      user: decode_user(object_field(obj, "user")),
      deleted: bool_field(obj, "deleted"),
      inline: decode_inline(obj),
      created_on: timestamp_field(obj, "created_on")?,
      updated_on: timestamp_field(obj, "updated_on")?,
    };

    trace!("Decoded comment {}", comment.id);
    Ok(comment)
  }
}

/// Decode a page envelope (`page`, `pagelen`, `size`, `next`, `values`).
///
/// Only a non-object input is an error. Pagination fields that are missing
/// or not numbers become zero, a missing `values` array yields no items, and
/// items that fail to decode are skipped.
pub fn decode_page<T: Decode>(value: &Value) -> Result<Page<T>> {
  let obj = as_object(value)?;

  let values = array_field(obj, "values").map(Vec::as_slice).unwrap_or_default();
  let items = values.iter().enumerate().fold(Vec::with_capacity(values.len()), |mut items, (index, entry)| {
    match T::decode(entry) {
      Ok(item) => items.push(item),
      Err(e) => warn!("Skipping page entry {}: {}", index, e),
    }
    items
  });

  Ok(Page {
    page: u64_field(obj, "page").unwrap_or_default(),
    pagelen: u64_field(obj, "pagelen").unwrap_or_default(),
    size: u64_field(obj, "size").unwrap_or_default(),
    next: str_field(obj, "next").map(str::to_string),
    items,
  })
}
