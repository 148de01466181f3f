//! # Bitbucket API Endpoints
//!
//! Endpoint implementations for the pull request and pull request comment
//! resources, as methods on [`crate::BitbucketClient`].

pub mod comments;
pub mod pullrequests;

#[cfg(test)]
mod tests;
