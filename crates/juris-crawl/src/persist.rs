//! Dedup-on-write: store each alias title at most once, first write wins.

use juris_core::{Error, record::CaseRecord, store::RecordStore};
use tracing::{error, info};

/// Outcome of persisting one case's records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PersistReport {
  pub written:    usize,
  /// Titles already present in the store.
  pub duplicates: usize,
  /// Titles abandoned because the store failed on lookup or insert.
  pub failed:     usize,
}

/// Write every record whose title is not yet stored.
///
/// Never fails: a store error abandons that one title and moves on to the
/// next.
pub async fn persist<S: RecordStore>(store: &S, records: &[CaseRecord]) -> PersistReport {
  let mut report = PersistReport::default();

  for record in records {
    match store.find_by_title(&record.title).await {
      Ok(Some(existing)) => {
        info!("case {:?} already stored as #{}, skipping", record.title, existing.id);
        report.duplicates += 1;
        continue;
      }
      Ok(None) => {}
      Err(e) => {
        error!("looking up case {:?}: {}", record.title, Error::Store(Box::new(e)));
        report.failed += 1;
        continue;
      }
    }

    match store.insert(record).await {
      Ok(id) => {
        info!("saved case {:?} as #{id}", record.title);
        report.written += 1;
      }
      Err(e) => {
        error!("saving case {:?}: {}", record.title, Error::Store(Box::new(e)));
        report.failed += 1;
      }
    }
  }

  report
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use juris_store_sqlite::SqliteStore;

  use super::*;
  use crate::tests::{FailingStore, MemoryStore};

  fn record(title: &str) -> CaseRecord {
    CaseRecord {
      title:     title.into(),
      case_date: NaiveDate::from_ymd_opt(2001, 3, 3).unwrap(),
      year:      2001,
      month:     "March".into(),
      content:   "content".into(),
      url:       "https://archive.test/case.html".into(),
    }
  }

  #[tokio::test]
  async fn writes_new_titles() {
    let store = MemoryStore::default();
    let report = persist(&store, &[record("A"), record("B")]).await;

    assert_eq!(report, PersistReport { written: 2, duplicates: 0, failed: 0 });
    assert_eq!(store.titles(), ["A", "B"]);
  }

  #[tokio::test]
  async fn existing_title_is_left_untouched() {
    let store = MemoryStore::default();
    persist(&store, &[record("A")]).await;

    let mut changed = record("A");
    changed.content = "different".into();
    let report = persist(&store, &[changed, record("B")]).await;

    assert_eq!(report, PersistReport { written: 1, duplicates: 1, failed: 0 });
    assert_eq!(store.records()[0].content, "content");
    assert_eq!(store.titles(), ["A", "B"]);
  }

  #[tokio::test]
  async fn repeated_alias_within_one_case_is_written_once() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let report = persist(&store, &[record("A"), record("A")]).await;

    assert_eq!(report, PersistReport { written: 1, duplicates: 1, failed: 0 });
    assert_eq!(store.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn store_errors_abandon_single_titles() {
    let store = FailingStore::default();
    let report = persist(&store, &[record("A"), record("B")]).await;
    assert_eq!(report, PersistReport { written: 0, duplicates: 0, failed: 2 });
  }

  #[tokio::test]
  async fn rejected_insert_does_not_stop_later_titles() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let too_long = record(&"x".repeat(501));
    let report = persist(&store, &[too_long, record("B")]).await;

    assert_eq!(report, PersistReport { written: 1, duplicates: 0, failed: 1 });
    assert!(store.exists("B").await.unwrap());
  }
}
