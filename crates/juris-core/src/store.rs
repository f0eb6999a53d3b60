//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `juris-store-sqlite`). The crawler
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{CaseRecord, StoredCase};

/// Abstraction over a case record store.
///
/// Writes are append-only: records are never updated or deleted. The store
/// does not enforce title uniqueness itself; callers check with
/// [`RecordStore::find_by_title`] before calling [`RecordStore::insert`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up a record by exact title. Returns `None` if not found.
  fn find_by_title<'a>(
    &'a self,
    title: &'a str,
  ) -> impl Future<Output = Result<Option<StoredCase>, Self::Error>> + Send + 'a;

  /// Persist `record` and return its generated id. Each insert commits on
  /// its own.
  fn insert<'a>(
    &'a self,
    record: &'a CaseRecord,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  /// Number of stored records.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Release the underlying connection.
  fn close(self) -> impl Future<Output = Result<(), Self::Error>> + Send
  where
    Self: Sized;

  /// Whether a record with exactly this title exists.
  fn exists<'a>(
    &'a self,
    title: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a {
    async move { Ok(self.find_by_title(title).await?.is_some()) }
  }
}
