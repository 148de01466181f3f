//! # Client Errors
//!
//! Error taxonomy for decoding Bitbucket responses, building request bodies,
//! and talking to the API.

use thiserror::Error;

/// Result type used throughout the client
pub type Result<T, E = BitbucketError> = std::result::Result<T, E>;

/// Errors produced by the Bitbucket client
#[derive(Debug, Error)]
pub enum BitbucketError {
  /// The server returned its `{"type": "error"}` envelope in place of an
  /// entity.
  #[error("Bitbucket API error: {message}")]
  RemoteApi { message: String, detail: Option<String> },

  /// The top-level response was not the JSON object the operation expects.
  #[error("Not a valid format: expected a JSON object, found {found}")]
  InvalidResponseFormat { found: &'static str },

  /// A timestamp field was present but could not be parsed.
  #[error("malformed timestamp in `{field}`: '{value}'")]
  MalformedTimestamp {
    field: &'static str,
    value: String,
    #[source]
    source: chrono::ParseError,
  },

  /// Serializing an outgoing request body failed.
  #[error("failed to encode request body")]
  RequestBody(#[from] serde_json::Error),

  /// The configured base URL cannot have path segments appended to it.
  #[error("invalid Bitbucket base URL '{0}'")]
  InvalidBaseUrl(String),

  /// Failure reported by the transport (network, HTTP status, body reading).
  #[error(transparent)]
  Transport(#[from] anyhow::Error),
}

impl BitbucketError {
  /// Whether this error came from the server's per-entity error envelope
  pub const fn is_remote_api(&self) -> bool {
    matches!(self, Self::RemoteApi { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_format_message() {
    let err = BitbucketError::InvalidResponseFormat { found: "string" };
    assert!(err.to_string().contains("Not a valid format"));
    assert!(err.to_string().contains("string"));
  }

  #[test]
  fn test_remote_api_message() {
    let err = BitbucketError::RemoteApi {
      message: "Pull request not found".to_string(),
      detail: None,
    };
    assert_eq!(err.to_string(), "Bitbucket API error: Pull request not found");
    assert!(err.is_remote_api());
  }

  #[test]
  fn test_transport_is_transparent() {
    let err = BitbucketError::from(anyhow::anyhow!("connection refused"));
    assert_eq!(err.to_string(), "connection refused");
    assert!(!err.is_remote_api());
  }
}
