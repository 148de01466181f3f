//! Reading Bitbucket credentials stored in a `.netrc` file.
//!
//! Only lookup is supported; entries are written by hand or by other tools.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Login and password pair found for a machine
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Strip the scheme, path, and trailing slash from a host or URL so it can be
/// compared with `machine` entries.
pub fn normalize_host(raw_host: &str) -> String {
  let host = raw_host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://");
  host.split('/').next().unwrap_or_default().to_string()
}

/// Find credentials for `target_machine` in `.netrc` content.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted. An entry missing its login or password does not
/// match.
pub fn find_credentials(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();
  let mut in_target = false;
  let mut username = None;
  let mut password = None;

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        if in_target {
          break;
        }
        in_target = tokens.next() == Some(target_machine);
      }
      "default" => {
        if in_target {
          break;
        }
      }
      "login" if in_target => username = tokens.next().map(str::to_string),
      "password" if in_target => password = tokens.next().map(str::to_string),
      "login" | "password" | "account" => {
        tokens.next();
      }
      _ => {}
    }
  }

  match (username, password) {
    (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
      Some(Credentials { username, password })
    }
    _ => None,
  }
}

/// Read credentials for `machine` from the `.netrc` file under `home`.
///
/// A missing file yields `Ok(None)`; an unreadable one is an error.
pub fn read_netrc_credentials(home: &Path, machine: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }

  let content =
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read .netrc file at {}", path.display()))?;
  Ok(find_credentials(&content, machine))
}
