//! One crawl run and the resources it owns.

use juris_core::{Result, navigator::Navigator, store::RecordStore};
use tracing::{error, info, warn};

use crate::walker::{CrawlStats, WalkOptions, Walker};

/// Owns the navigator session and the store connection for one run.
///
/// [`Session::run`] consumes the session and releases both exactly once,
/// whether the walk finished or was aborted.
pub struct Session<N, S> {
  nav:     N,
  store:   S,
  options: WalkOptions,
}

impl<N: Navigator, S: RecordStore> Session<N, S> {
  pub fn new(nav: N, store: S, options: WalkOptions) -> Self {
    Self {
      nav,
      store,
      options,
    }
  }

  pub async fn run(mut self) -> Result<CrawlStats> {
    let mut walker = Walker::new(&mut self.nav, &self.store, &self.options);
    let result = walker.walk().await.map(|()| walker.stats().clone());

    match &result {
      Ok(stats) => info!(
        "crawl finished: {} year(s), {} month(s) ({} unavailable), {} case(s) \
         attempted, {} skipped, {} record(s) written, {} duplicate(s), {} failed write(s)",
        stats.years,
        stats.months,
        stats.months_unavailable,
        stats.cases_attempted,
        stats.cases_skipped,
        stats.records_written,
        stats.duplicates,
        stats.write_failures,
      ),
      Err(e) => error!("error during crawl: {e}"),
    }

    if let Err(e) = self.nav.close().await {
      warn!("closing navigator: {e}");
    }
    if let Err(e) = self.store.close().await {
      warn!("closing store: {e}");
    }

    result
  }
}
