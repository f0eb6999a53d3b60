//! Runtime configuration, read from the environment.

use std::{path::PathBuf, time::Duration};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::walker::WalkOptions;

pub const DEFAULT_BASE_URL: &str = "https://lawphil.net/judjuris/judjuris.html";
pub const DEFAULT_DATABASE: &str = "case_comparison.sqlite";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "crawl.log";

/// Crawl settings, deserialised from `JURIS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlConfig {
  /// `JURIS_BASE_URL`: the archive root listing the years.
  pub base_url:     String,
  /// `JURIS_DATABASE`: path of the SQLite file.
  pub database:     PathBuf,
  /// `JURIS_TIMEOUT_SECS`: bound on every wait and page fetch.
  pub timeout_secs: u64,
  /// `JURIS_LOG_FILE`: log file appended to alongside stderr.
  pub log_file:     PathBuf,
  /// `JURIS_USER_AGENT`
  pub user_agent:   String,
}

impl CrawlConfig {
  /// Read the process environment.
  pub fn load() -> Result<Self, ConfigError> {
    Self::from_env(Environment::with_prefix("JURIS"))
  }

  fn from_env(env: Environment) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("base_url", DEFAULT_BASE_URL)?
      .set_default("database", DEFAULT_DATABASE)?
      .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
      .set_default("log_file", DEFAULT_LOG_FILE)?
      .set_default("user_agent", concat!("juris/", env!("CARGO_PKG_VERSION")))?
      .add_source(env.try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

  pub fn walk_options(&self) -> WalkOptions {
    WalkOptions {
      root_url:     self.base_url.clone(),
      timeout:      self.timeout(),
      current_year: None,
    }
  }
}
