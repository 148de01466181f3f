//! Constants for the bitbucket-api client

/// Base URL for the Bitbucket Cloud REST API
pub const API_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// `.netrc` machine name used when no entry exists for the API host itself
pub const NETRC_FALLBACK_MACHINE: &str = "bitbucket.org";

/// User-Agent header value for the Bitbucket API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the Bitbucket API
pub const ACCEPT: &str = "application/json";

/// Number of comment lists fetched at once when enriching a page of pull
/// requests
pub const DEFAULT_COMMENT_CONCURRENCY: usize = 4;

/// Request timeout applied by the HTTP transport
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
