//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use juris_core::{record::CaseRecord, store::RecordStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn case(title: &str) -> CaseRecord {
  CaseRecord {
    title:     title.into(),
    case_date: NaiveDate::from_ymd_opt(1990, 1, 5).unwrap(),
    year:      1990,
    month:     "January".into(),
    content:   "WHEREFORE, the petition is DENIED.".into(),
    url:       "https://lawphil.net/judjuris/juri1990/jan1990/gr_12345_1990.html"
      .into(),
  }
}

// ─── Insert / lookup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_by_title() {
  let s = store().await;

  let id = s.insert(&case("G.R. No. 12345")).await.unwrap();
  let found = s.find_by_title("G.R. No. 12345").await.unwrap().unwrap();

  assert_eq!(found.id, id);
  assert_eq!(found.record, case("G.R. No. 12345"));
}

#[tokio::test]
async fn find_missing_title_returns_none() {
  let s = store().await;
  s.insert(&case("G.R. No. 12345")).await.unwrap();

  assert!(s.find_by_title("G.R. No. 99999").await.unwrap().is_none());
  assert!(!s.exists("G.R. No. 99999").await.unwrap());
  assert!(s.exists("G.R. No. 12345").await.unwrap());
}

#[tokio::test]
async fn lookup_is_exact_not_prefix() {
  let s = store().await;
  s.insert(&case("G.R. No. 12345")).await.unwrap();

  assert!(!s.exists("G.R. No. 1234").await.unwrap());
  assert!(!s.exists("g.r. no. 12345").await.unwrap());
}

#[tokio::test]
async fn ids_are_generated_in_order() {
  let s = store().await;
  let a = s.insert(&case("A")).await.unwrap();
  let b = s.insert(&case("B")).await.unwrap();
  assert!(b > a);
  assert_eq!(s.count().await.unwrap(), 2);
}

#[tokio::test]
async fn created_at_is_assigned_by_the_store() {
  let s = store().await;
  let before = chrono::Utc::now() - chrono::Duration::seconds(5);
  s.insert(&case("A")).await.unwrap();

  let found = s.find_by_title("A").await.unwrap().unwrap();
  assert!(found.created_at >= before);
}

#[tokio::test]
async fn list_returns_rows_oldest_first() {
  let s = store().await;
  s.insert(&case("First")).await.unwrap();
  s.insert(&case("Second")).await.unwrap();

  let titles: Vec<_> = s
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.record.title)
    .collect();
  assert_eq!(titles, ["First", "Second"]);
}

// ─── Column bounds ───────────────────────────────────────────────────────────

#[tokio::test]
async fn over_long_title_is_rejected() {
  let s = store().await;
  let r = s.insert(&case(&"x".repeat(501))).await;
  assert!(r.is_err());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn over_long_month_is_rejected() {
  let s = store().await;
  let mut c = case("A");
  c.month = "M".repeat(21);
  assert!(s.insert(&c).await.is_err());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopen_keeps_rows() {
  let dir = std::env::temp_dir().join(format!(
    "juris-store-test-{}-{}",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("cases.sqlite");

  let s = SqliteStore::open(&path).await.unwrap();
  s.insert(&case("A")).await.unwrap();
  s.close().await.unwrap();

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.exists("A").await.unwrap());
  s.close().await.unwrap();

  std::fs::remove_dir_all(&dir).ok();
}
