//! # Bitbucket API Client
//!
//! Provides Bitbucket Cloud REST API integration for pull requests and pull
//! request comments: typed decoding of API responses, request body building,
//! and an async client covering the pull request lifecycle.

pub mod auth;
pub mod body;
pub mod client;
pub mod config;
pub mod consts;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod json;
pub mod models;
pub mod netrc;
pub mod transport;

// Re-export the client
pub use client::{BitbucketClient, create_bitbucket_client};
pub use config::ClientConfig;
pub use decode::{Decode, decode_page};
pub use error::{BitbucketError, Result};
// Re-export models
pub use models::{
  BitbucketAuth, CommentContent, InlineAnchor, MergeStrategy, Page, Participant, PullRequest, PullRequestComment,
  PullRequestCommentOptions, PullRequestEndpoint, PullRequestListOptions, PullRequestOptions, RepositoryRef,
  StatusListOptions, User,
};
pub use transport::{HttpTransport, Transport};
