//! SQL schema for the juris SQLite store.
//!
//! Executed once at connection startup. The length checks stand in for the
//! `VARCHAR` bounds of the column types: an over-long value fails its insert
//! instead of being silently truncated.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Cases are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS cases (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    title      TEXT CHECK (length(title) <= 500),
    case_date  TEXT,                -- YYYY-MM-DD
    content    TEXT,
    year       INTEGER,
    month      TEXT CHECK (length(month) <= 20),
    url        TEXT CHECK (length(url) <= 500),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Not UNIQUE: one row per title is kept by the writer checking first.
CREATE INDEX IF NOT EXISTS cases_title_idx ON cases(title);

PRAGMA user_version = 1;
";
