//! Error types for `juris-core`.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An expected element or condition did not show up within the bound.
  #[error("timed out after {after:?} waiting for {what}")]
  Timeout { what: String, after: Duration },

  #[error("navigation failed: {0}")]
  Navigation(String),

  #[error("no previous view to go back to")]
  NoHistory,

  #[error("extraction failed for {title:?}: {reason}")]
  Extraction { title: String, reason: String },

  #[error("invalid case date {0:?}")]
  InvalidDate(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("startup failed: {0}")]
  Startup(String),
}

impl Error {
  pub fn extraction(title: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Extraction {
      title:  title.into(),
      reason: reason.into(),
    }
  }

  pub fn is_timeout(&self) -> bool { matches!(self, Self::Timeout { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
