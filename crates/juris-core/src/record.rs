//! Case records: the rows the crawler produces.
//!
//! A single decision listed under several alias titles becomes one
//! [`CaseRecord`] per title. The rows share every field except `title`; the
//! title alone is the dedup key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Month labels in the order the archive's month list is walked.
pub const MONTHS: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December",
];

/// A case record ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
  pub title:     String,
  pub case_date: NaiveDate,
  /// Year node the case was found under, not a year parsed from `content`.
  pub year:      i32,
  /// Month label the case was found under.
  pub month:     String,
  pub content:   String,
  pub url:       String,
}

/// A [`CaseRecord`] as read back from a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCase {
  pub id:         i64,
  pub record:     CaseRecord,
  /// Write time, assigned by the store.
  pub created_at: DateTime<Utc>,
}
