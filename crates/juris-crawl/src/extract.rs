//! Case extraction: from a case link and its detail page to [`CaseRecord`]s.
//!
//! Everything except [`read_detail`] is a pure function of text, so the
//! heuristics can be tested without a navigator.

use std::time::Duration;

use chrono::NaiveDate;
use juris_core::{
  Error, Result,
  navigator::{Element, Locator, Navigator},
  record::CaseRecord,
};

/// Tag of the element that holds a decision's text on its detail page.
pub const CONTENT_TAG: &str = "blockquote";

/// Everything past this marker is the footnotes section.
pub const FOOTNOTES_MARKER: &str = "Footnotes";

/// Long-form decision date, e.g. `January 5, 1990`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

// ─── Case list entry ─────────────────────────────────────────────────────────

/// What the case list says about one case, before its page is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseEntry {
  /// Alias titles in listing order; the first is the primary title.
  pub titles:    Vec<String>,
  /// Docket suffix of the primary title, used to find the content block.
  pub anchor:    String,
  pub date_text: String,
  pub case_date: NaiveDate,
}

impl CaseEntry {
  /// Read a case link: its display text and the text of its parent, which
  /// carries the decision date on the line after the titles.
  pub fn from_link(link: &Element) -> Result<Self> {
    Self::parse(&link.text, &link.parent_text)
  }

  pub fn parse(display_text: &str, parent_text: &str) -> Result<Self> {
    let titles = split_titles(display_text);
    let Some(primary) = titles.first() else {
      return Err(Error::extraction(display_text, "link has no title"));
    };
    let anchor = docket_anchor(primary)
      .ok_or_else(|| Error::extraction(primary.as_str(), "title has no docket number"))?
      .to_owned();
    let date_text = date_line(parent_text)
      .ok_or_else(|| Error::extraction(primary.as_str(), "no date next to the link"))?
      .to_owned();
    let case_date = parse_case_date(&date_text)?;

    Ok(Self {
      titles,
      anchor,
      date_text,
      case_date,
    })
  }

  pub fn primary_title(&self) -> &str { &self.titles[0] }
}

/// Split a link's display text into its `/`-separated alias titles.
pub fn split_titles(display_text: &str) -> Vec<String> {
  display_text
    .split('/')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_owned)
    .collect()
}

/// The part of `title` after its last `.`, e.g. `12345` for
/// `G.R. No. 12345`.
pub fn docket_anchor(title: &str) -> Option<&str> {
  let anchor = title.rsplit('.').next()?.trim();
  (!anchor.is_empty()).then_some(anchor)
}

/// The second non-empty line of the link's parent text.
pub fn date_line(parent_text: &str) -> Option<&str> {
  parent_text
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .nth(1)
}

pub fn parse_case_date(text: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
    .map_err(|_| Error::InvalidDate(text.to_owned()))
}

// ─── Detail page ─────────────────────────────────────────────────────────────

/// What the opened case page contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDetail {
  pub content: String,
  /// Absolute URL of the case page.
  pub url:     String,
}

/// Read the decision text from the detail view the navigator is showing.
///
/// The content block is the nearest `<blockquote>` around the first text
/// containing the docket anchor. When several decisions on one page share
/// the anchor as a substring the first one wins.
pub async fn read_detail<N: Navigator>(
  nav: &mut N,
  entry: &CaseEntry,
  timeout: Duration,
) -> Result<CaseDetail> {
  let locator = Locator::enclosing(CONTENT_TAG, entry.anchor.as_str());
  let block = nav.find(&locator, timeout).await?;
  let url = nav
    .current_url()
    .ok_or_else(|| Error::Navigation("case page has no url".into()))?;

  Ok(CaseDetail {
    content: normalize_content(&nav.text_of(&block)),
    url,
  })
}

/// Double every line break so paragraphs survive flattening, then cut the
/// footnotes section if there is one.
pub fn normalize_content(raw: &str) -> String {
  let content = raw.replace('\n', "\n\n");
  match content.split_once(FOOTNOTES_MARKER) {
    Some((body, _)) => body.trim().to_owned(),
    None => content,
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One record per alias title, all sharing the same payload.
pub fn build_records(
  entry: &CaseEntry,
  detail: &CaseDetail,
  year: i32,
  month: &str,
) -> Vec<CaseRecord> {
  entry
    .titles
    .iter()
    .map(|title| CaseRecord {
      title:     title.clone(),
      case_date: entry.case_date,
      year,
      month:     month.to_owned(),
      content:   detail.content.clone(),
      url:       detail.url.clone(),
    })
    .collect()
}
