//! The `Navigator` trait and the element/locator types it trades in.
//!
//! The archive can only be walked by activating links on a single stateful
//! session and going back afterwards. This module abstracts that session so
//! the crawler does not care whether it is backed by a browser, plain HTTP
//! fetches, or a scripted replay of saved pages.

use std::{collections::BTreeMap, fmt, time::Duration};

use crate::Result;

// ─── Locators ────────────────────────────────────────────────────────────────

/// How an element's text is compared against a needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
  /// Trimmed text equals the needle.
  Exact(String),
  /// Text contains the needle anywhere.
  Contains(String),
}

impl TextMatch {
  pub fn matches(&self, text: &str) -> bool {
    match self {
      Self::Exact(needle) => text.trim() == needle,
      Self::Contains(needle) => text.contains(needle.as_str()),
    }
  }
}

/// A query against the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
  /// Any element matching a CSS selector.
  Css(String),
  /// An `<a>` element selected by its rendered text.
  Link {
    text:          TextMatch,
    /// Skip links whose `class` attribute contains this substring.
    exclude_class: Option<String>,
  },
  /// The nearest `tag` ancestor of the first text node containing `needle`.
  Enclosing { tag: String, needle: String },
}

impl Locator {
  pub fn css(selector: impl Into<String>) -> Self { Self::Css(selector.into()) }

  pub fn link_exact(text: impl Into<String>) -> Self {
    Self::Link {
      text:          TextMatch::Exact(text.into()),
      exclude_class: None,
    }
  }

  pub fn link_containing(text: impl Into<String>) -> Self {
    Self::Link {
      text:          TextMatch::Contains(text.into()),
      exclude_class: None,
    }
  }

  /// Restrict a [`Locator::Link`] to elements without `class` in their class
  /// attribute. Other locators are returned unchanged.
  pub fn excluding_class(self, class: impl Into<String>) -> Self {
    match self {
      Self::Link { text, .. } => Self::Link {
        text,
        exclude_class: Some(class.into()),
      },
      other => other,
    }
  }

  pub fn enclosing(tag: impl Into<String>, needle: impl Into<String>) -> Self {
    Self::Enclosing {
      tag:    tag.into(),
      needle: needle.into(),
    }
  }
}

impl fmt::Display for Locator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Css(selector) => write!(f, "css `{selector}`"),
      Self::Link { text, exclude_class } => {
        match text {
          TextMatch::Exact(t) => write!(f, "link with text {t:?}")?,
          TextMatch::Contains(t) => write!(f, "link containing {t:?}")?,
        }
        if let Some(class) = exclude_class {
          write!(f, " without class {class:?}")?;
        }
        Ok(())
      }
      Self::Enclosing { tag, needle } => {
        write!(f, "<{tag}> enclosing {needle:?}")
      }
    }
  }
}

// ─── Elements ────────────────────────────────────────────────────────────────

/// Opaque identity of an element within the view it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub usize);

/// A snapshot of one element, taken when it was located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub handle:      ElementHandle,
  pub tag:         String,
  /// Rendered text, with line breaks where the page breaks lines.
  pub text:        String,
  pub attributes:  BTreeMap<String, String>,
  /// Rendered text of the parent element.
  pub parent_text: String,
}

impl Element {
  /// True if the whitespace-separated `class` attribute contains `class` as a
  /// substring.
  pub fn has_class(&self, class: &str) -> bool {
    self
      .attributes
      .get("class")
      .is_some_and(|c| c.contains(class))
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A single stateful browsing session.
///
/// Every wait is bounded: methods taking a `timeout` return
/// [`Error::Timeout`](crate::Error::Timeout) rather than blocking past it.
pub trait Navigator {
  /// Replace the session with a fresh view of `url`, clearing history.
  async fn load(&mut self, url: &str) -> Result<()>;

  /// All elements in the current view matching `locator`, in document order.
  /// Fails with a timeout if none appear within `timeout`.
  async fn find_all(
    &mut self,
    locator: &Locator,
    timeout: Duration,
  ) -> Result<Vec<Element>>;

  /// The first element matching `locator`.
  async fn find(&mut self, locator: &Locator, timeout: Duration) -> Result<Element>;

  /// Wait until no visible element matches `locator`.
  async fn wait_gone(&mut self, locator: &Locator, timeout: Duration) -> Result<()>;

  /// Click `element`. Following a link pushes a new view onto the history.
  async fn activate(&mut self, element: &Element) -> Result<()>;

  /// Return to the previous view.
  async fn back(&mut self) -> Result<()>;

  /// Absolute URL of the current view, if one is loaded.
  fn current_url(&self) -> Option<String>;

  /// Release the session. Called exactly once at the end of a run.
  async fn close(&mut self) -> Result<()>;

  fn text_of(&self, element: &Element) -> String { element.text.clone() }

  fn attribute_of(&self, element: &Element, name: &str) -> Option<String> {
    element.attributes.get(name).cloned()
  }
}
