//! The Year → Month → Case traversal.
//!
//! The walker drives a [`Navigator`] through the archive's three list levels
//! and opens every case below them exactly once. After each case it always
//! returns to the case list, and after each list it returns to the parent
//! list, whether or not the level below succeeded.
//!
//! Failures are handled at two granularities:
//!
//! - anything that goes wrong with a single case becomes a
//!   [`CaseOutcome::Skipped`], is logged, and the walk moves on;
//! - failing to enumerate a list (years, months, cases), or failing to get
//!   back to a list, ends the walk with an error.

use std::time::Duration;

use chrono::{Datelike as _, Local};
use juris_core::{
  Error, Result,
  navigator::{Element, Locator, Navigator},
  record::{CaseRecord, MONTHS},
  store::RecordStore,
};
use tracing::{debug, error, info, warn};

use crate::{
  extract::{self, CaseEntry},
  persist,
};

/// Links to year pages on the archive root.
pub const YEAR_LINKS: &str = "a[href*='juri']";

/// Marks entries that are listed but not published yet.
pub const UNAVAILABLE_CLASS: &str = "nya";

/// Marks months whose decisions are still being uploaded.
pub const PROGRESSIVE_CLASS: &str = "progressive";

/// Docket marker carried by every decision link.
pub const CASE_MARKER: &str = "G.R.";

/// Close button of the cookie banner.
pub const COOKIE_CLOSE: &str = ".cookie_box_close";

// ─── Options and state ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WalkOptions {
  /// Archive root, the page listing the years.
  pub root_url:     String,
  /// Bound on every wait.
  pub timeout:      Duration,
  /// Years after this are never visited. Defaults to the local clock's year.
  pub current_year: Option<i32>,
}

/// Which list the navigator is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  AtYearList,
  AtMonthList,
  AtCaseList,
}

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
  pub years:              usize,
  pub months:             usize,
  pub months_unavailable: usize,
  pub cases_attempted:    usize,
  pub cases_skipped:      usize,
  pub records_written:    usize,
  pub duplicates:         usize,
  pub write_failures:     usize,
}

/// Result of opening one case.
#[derive(Debug)]
pub enum CaseOutcome {
  Extracted(Vec<CaseRecord>),
  Skipped {
    title:     String,
    date_text: Option<String>,
    reason:    Error,
  },
}

/// Keep labels that are plain numbers no later than `current_year`, in the
/// order given.
pub fn traversable_years<'a>(
  labels: impl IntoIterator<Item = &'a str>,
  current_year: i32,
) -> Vec<i32> {
  labels
    .into_iter()
    .filter_map(parse_year)
    .filter(|&year| year <= current_year)
    .collect()
}

fn parse_year(label: &str) -> Option<i32> {
  let label = label.trim();
  if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  label.parse().ok()
}

// ─── Walker ──────────────────────────────────────────────────────────────────

pub struct Walker<'a, N, S> {
  nav:     &'a mut N,
  store:   &'a S,
  options: &'a WalkOptions,
  level:   Level,
  stats:   CrawlStats,
}

impl<'a, N: Navigator, S: RecordStore> Walker<'a, N, S> {
  pub fn new(nav: &'a mut N, store: &'a S, options: &'a WalkOptions) -> Self {
    Self {
      nav,
      store,
      options,
      level: Level::AtYearList,
      stats: CrawlStats::default(),
    }
  }

  pub fn level(&self) -> Level { self.level }

  pub fn stats(&self) -> &CrawlStats { &self.stats }

  fn enter(&mut self, level: Level) {
    debug!("{:?} -> {:?}", self.level, level);
    self.level = level;
  }

  /// Walk the whole archive from its root.
  pub async fn walk(&mut self) -> Result<()> {
    let timeout = self.options.timeout;
    self.nav.load(&self.options.root_url).await?;
    self.enter(Level::AtYearList);
    info!("started crawl at {}", self.options.root_url);

    self.dismiss_cookie_popup().await;

    let current_year = self
      .options
      .current_year
      .unwrap_or_else(|| Local::now().year());
    let links = self.nav.find_all(&Locator::css(YEAR_LINKS), timeout).await?;
    let labels: Vec<String> = links.iter().map(|l| self.nav.text_of(l)).collect();
    let years = traversable_years(labels.iter().map(String::as_str), current_year);
    info!("{} year(s) to crawl", years.len());

    for year in years {
      self.walk_year(year).await?;
    }
    Ok(())
  }

  async fn dismiss_cookie_popup(&mut self) {
    let timeout = self.options.timeout;
    let close = Locator::css(COOKIE_CLOSE);
    let result = async {
      let button = self.nav.find(&close, timeout).await?;
      self.nav.activate(&button).await?;
      self.nav.wait_gone(&close, timeout).await
    }
    .await;

    if let Err(e) = result {
      warn!("could not dismiss the cookie popup: {e}");
    }
  }

  async fn walk_year(&mut self, year: i32) -> Result<()> {
    let timeout = self.options.timeout;
    let label = year.to_string();

    // The list may have been re-rendered since it was enumerated.
    let link = self
      .nav
      .find(&Locator::link_containing(label.as_str()), timeout)
      .await?;
    let text = self.nav.text_of(&link);
    if parse_year(&text).is_none() {
      warn!("year link for {label} reads {text:?}, skipping");
      return Ok(());
    }

    info!("processing year {year}");
    self.nav.activate(&link).await?;
    self.enter(Level::AtMonthList);
    self.stats.years += 1;

    for month in MONTHS {
      self.walk_month(year, month).await?;
    }

    debug!("going back to year list");
    self.nav.back().await?;
    self.enter(Level::AtYearList);
    Ok(())
  }

  async fn walk_month(&mut self, year: i32, month: &str) -> Result<()> {
    let timeout = self.options.timeout;

    let link = self
      .nav
      .find(
        &Locator::link_exact(month).excluding_class(UNAVAILABLE_CLASS),
        timeout,
      )
      .await?;
    if link.has_class(PROGRESSIVE_CLASS) {
      info!("skipping {month} {year}: not available yet");
      self.stats.months_unavailable += 1;
      return Ok(());
    }

    info!("loading cases for {month} {year}");
    self.nav.activate(&link).await?;
    self.enter(Level::AtCaseList);
    self.stats.months += 1;

    let cases = self
      .nav
      .find_all(
        &Locator::link_containing(CASE_MARKER).excluding_class(UNAVAILABLE_CLASS),
        timeout,
      )
      .await?;
    for case in &cases {
      self.walk_case(year, month, case).await?;
    }

    debug!("going back to month list");
    self.nav.back().await?;
    self.enter(Level::AtMonthList);
    Ok(())
  }

  async fn walk_case(&mut self, year: i32, month: &str, link: &Element) -> Result<()> {
    self.stats.cases_attempted += 1;

    match self.process_case(year, month, link).await? {
      CaseOutcome::Extracted(records) => {
        let report = persist::persist(self.store, &records).await;
        self.stats.records_written += report.written;
        self.stats.duplicates += report.duplicates;
        self.stats.write_failures += report.failed;
      }
      CaseOutcome::Skipped {
        title,
        date_text,
        reason,
      } => {
        error!(
          "error processing case {title:?} ({}): {reason}. Loading next case",
          date_text.as_deref().unwrap_or("no date")
        );
        self.stats.cases_skipped += 1;
      }
    }
    Ok(())
  }

  /// Open one case and read it, leaving the navigator on the case list.
  ///
  /// Only a failure to get back to the case list is returned as an error;
  /// everything else is a [`CaseOutcome::Skipped`].
  pub async fn process_case(
    &mut self,
    year: i32,
    month: &str,
    link: &Element,
  ) -> Result<CaseOutcome> {
    let timeout = self.options.timeout;
    let display = self.nav.text_of(link);

    let entry = match CaseEntry::from_link(link) {
      Ok(entry) => entry,
      Err(reason) => {
        return Ok(CaseOutcome::Skipped {
          title: display.trim().to_owned(),
          date_text: extract::date_line(&link.parent_text).map(str::to_owned),
          reason,
        });
      }
    };
    info!("processing case: {} - {}", entry.primary_title(), entry.date_text);

    if let Err(reason) = self.nav.activate(link).await {
      return Ok(skipped(&entry, reason));
    }
    let detail = extract::read_detail(&mut *self.nav, &entry, timeout).await;

    debug!("going back to case list");
    self.nav.back().await?;

    Ok(match detail {
      Ok(detail) => {
        CaseOutcome::Extracted(extract::build_records(&entry, &detail, year, month))
      }
      Err(reason) => skipped(&entry, reason),
    })
  }
}

fn skipped(entry: &CaseEntry, reason: Error) -> CaseOutcome {
  CaseOutcome::Skipped {
    title: entry.primary_title().to_owned(),
    date_text: Some(entry.date_text.clone()),
    reason,
  }
}
