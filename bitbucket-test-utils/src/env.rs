//! Environment variable management for testing
//!
//! Tests that exercise environment-driven configuration use [`EnvVarGuard`] to
//! override a single variable and have the previous value restored on drop.

use std::env;

/// RAII guard for one environment variable
///
/// The original value (or its absence) is captured on creation and put back
/// when the guard is dropped.
pub struct EnvVarGuard {
  key: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Capture the current value of `key` without changing it
  pub fn new(key: &str) -> Self {
    Self {
      key: key.to_string(),
      original: env::var(key).ok(),
    }
  }

  /// Set the variable for the lifetime of the guard
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.key, value);
    }
  }

  /// Remove the variable for the lifetime of the guard
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.key);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.key, val);
      },
      None => unsafe {
        env::remove_var(&self.key);
      },
    }
  }
}
