//! [`HtmlNavigator`], the HTML implementation of [`Navigator`].

use std::time::Duration;

use juris_core::{
  Error, Result,
  navigator::{Element, ElementHandle, Locator, Navigator},
};
use reqwest::Url;
use scraper::Html;
use tracing::debug;

use crate::{dom, source::PageSource};

/// One page on the history stack.
struct View {
  url:    Url,
  html:   String,
  /// Elements dismissed by activating them (e.g. a popup's close button).
  hidden: Vec<ElementHandle>,
}

impl View {
  fn parse(&self) -> Html { Html::parse_document(&self.html) }
}

/// A browsing session over static HTML.
///
/// Views are immutable snapshots, so an element missing from the current
/// view will never appear in it: `find`, `find_all` and `wait_gone` resolve
/// at once, reporting [`Error::Timeout`] exactly where a live browser would
/// have given up after the bound. Page fetches are bounded by
/// `fetch_timeout`.
pub struct HtmlNavigator<P> {
  source:        P,
  fetch_timeout: Duration,
  history:       Vec<View>,
}

impl<P: PageSource> HtmlNavigator<P> {
  pub fn new(source: P, fetch_timeout: Duration) -> Self {
    Self {
      source,
      fetch_timeout,
      history: Vec::new(),
    }
  }

  pub fn source(&self) -> &P { &self.source }

  /// Number of views on the history stack, including the current one.
  pub fn depth(&self) -> usize { self.history.len() }

  fn current(&self) -> Result<&View> {
    self
      .history
      .last()
      .ok_or_else(|| Error::Navigation("no page loaded".into()))
  }

  async fn fetch(&self, url: &Url) -> Result<View> {
    let html = tokio::time::timeout(self.fetch_timeout, self.source.fetch(url))
      .await
      .map_err(|_| Error::Timeout {
        what:  format!("page {url}"),
        after: self.fetch_timeout,
      })??;
    Ok(View {
      url: url.clone(),
      html,
      hidden: Vec::new(),
    })
  }

  fn select_all(&self, locator: &Locator) -> Result<Vec<Element>> {
    let view = self.current()?;
    let doc = view.parse();
    let found = dom::select(&doc, locator, &view.hidden)?;
    Ok(found.into_iter().map(|e| dom::snapshot(&doc, e)).collect())
  }
}

fn timeout(locator: &Locator, after: Duration) -> Error {
  Error::Timeout {
    what: locator.to_string(),
    after,
  }
}

impl<P: PageSource> Navigator for HtmlNavigator<P> {
  async fn load(&mut self, url: &str) -> Result<()> {
    let url =
      Url::parse(url).map_err(|e| Error::Navigation(format!("bad url {url:?}: {e}")))?;
    let view = self.fetch(&url).await?;
    self.history.clear();
    self.history.push(view);
    Ok(())
  }

  async fn find_all(
    &mut self,
    locator: &Locator,
    timeout_after: Duration,
  ) -> Result<Vec<Element>> {
    let found = self.select_all(locator)?;
    if found.is_empty() {
      return Err(timeout(locator, timeout_after));
    }
    Ok(found)
  }

  async fn find(&mut self, locator: &Locator, timeout_after: Duration) -> Result<Element> {
    self
      .select_all(locator)?
      .into_iter()
      .next()
      .ok_or_else(|| timeout(locator, timeout_after))
  }

  async fn wait_gone(&mut self, locator: &Locator, timeout_after: Duration) -> Result<()> {
    if self.select_all(locator)?.is_empty() {
      Ok(())
    } else {
      Err(timeout(locator, timeout_after))
    }
  }

  async fn activate(&mut self, element: &Element) -> Result<()> {
    let Some(href) = element.attributes.get("href") else {
      // Not a link: clicking it dismisses it from the current view.
      let view = self
        .history
        .last_mut()
        .ok_or_else(|| Error::Navigation("no page loaded".into()))?;
      view.hidden.push(element.handle);
      return Ok(());
    };

    let target = self
      .current()?
      .url
      .join(href)
      .map_err(|e| Error::Navigation(format!("bad link {href:?}: {e}")))?;
    if !matches!(target.scheme(), "http" | "https" | "file") {
      return Err(Error::Navigation(format!("cannot follow {target}")));
    }

    debug!("following {target}");
    let view = self.fetch(&target).await?;
    self.history.push(view);
    Ok(())
  }

  async fn back(&mut self) -> Result<()> {
    if self.history.len() < 2 {
      return Err(Error::NoHistory);
    }
    self.history.pop();
    Ok(())
  }

  fn current_url(&self) -> Option<String> {
    self.history.last().map(|v| v.url.to_string())
  }

  async fn close(&mut self) -> Result<()> {
    self.history.clear();
    Ok(())
  }
}
