//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Case dates are stored as `YYYY-MM-DD`; `created_at` is an RFC 3339 string
//! produced by SQLite itself.

use chrono::{DateTime, NaiveDate, Utc};
use juris_core::record::{CaseRecord, StoredCase};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `cases` row exactly as SQLite returns it.
pub struct RawCase {
  pub id:         i64,
  pub title:      String,
  pub case_date:  String,
  pub content:    String,
  pub year:       i64,
  pub month:      String,
  pub url:        String,
  pub created_at: String,
}

impl RawCase {
  pub const COLUMNS: &'static str =
    "id, title, case_date, content, year, month, url, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      title:      row.get(1)?,
      case_date:  row.get(2)?,
      content:    row.get(3)?,
      year:       row.get(4)?,
      month:      row.get(5)?,
      url:        row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_stored(self) -> Result<StoredCase> {
    let year =
      i32::try_from(self.year).map_err(|_| Error::YearOutOfRange(self.year))?;
    Ok(StoredCase {
      id:         self.id,
      record:     CaseRecord {
        title: self.title,
        case_date: decode_date(&self.case_date)?,
        year,
        month: self.month,
        content: self.content,
        url: self.url,
      },
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
