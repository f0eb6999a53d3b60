//! Error type for `juris-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("year {0} does not fit the year column")]
  YearOutOfRange(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
