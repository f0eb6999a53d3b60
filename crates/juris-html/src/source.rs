//! Where page bytes come from.

use std::{collections::HashMap, sync::Mutex, time::Duration};

use juris_core::{Error, Result};
use reqwest::{Client, Url};
use tracing::debug;

/// Fetches the HTML of a page.
pub trait PageSource {
  async fn fetch(&self, url: &Url) -> Result<String>;
}

// ─── HTTP ────────────────────────────────────────────────────────────────────

/// Fetches pages over HTTP(S).
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpSource {
  client: Client,
}

impl HttpSource {
  pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .user_agent(user_agent)
      .timeout(timeout)
      .build()
      .map_err(|e| Error::Startup(format!("failed to build HTTP client: {e}")))?;
    Ok(Self { client })
  }
}

impl PageSource for HttpSource {
  async fn fetch(&self, url: &Url) -> Result<String> {
    debug!("GET {url}");
    let resp = self
      .client
      .get(url.clone())
      .send()
      .await
      .map_err(|e| Error::Navigation(format!("GET {url} failed: {e}")))?;

    if !resp.status().is_success() {
      return Err(Error::Navigation(format!("GET {url} → {}", resp.status())));
    }
    resp
      .text()
      .await
      .map_err(|e| Error::Navigation(format!("reading {url}: {e}")))
  }
}

// ─── Saved pages ─────────────────────────────────────────────────────────────

/// A fixed set of pages keyed by absolute URL.
///
/// Records every URL it is asked for, so a replayed crawl can be checked for
/// which pages it visited and in what order.
#[derive(Default)]
pub struct StaticPages {
  pages:   HashMap<String, String>,
  fetched: Mutex<Vec<String>>,
}

impl StaticPages {
  pub fn new() -> Self { Self::default() }

  pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
    self.insert(url, html);
    self
  }

  pub fn insert(&mut self, url: impl Into<String>, html: impl Into<String>) {
    self.pages.insert(url.into(), html.into());
  }

  /// URLs requested so far, in request order.
  pub fn fetched(&self) -> Vec<String> {
    self
      .fetched
      .lock()
      .map(|f| f.clone())
      .unwrap_or_default()
  }
}

impl PageSource for StaticPages {
  async fn fetch(&self, url: &Url) -> Result<String> {
    if let Ok(mut fetched) = self.fetched.lock() {
      fetched.push(url.to_string());
    }
    self
      .pages
      .get(url.as_str())
      .cloned()
      .ok_or_else(|| Error::Navigation(format!("GET {url} → 404 Not Found")))
  }
}

impl<P: PageSource> PageSource for &P {
  async fn fetch(&self, url: &Url) -> Result<String> { (**self).fetch(url).await }
}
