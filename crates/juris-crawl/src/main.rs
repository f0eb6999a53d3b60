//! juris crawler binary.
//!
//! Reads `JURIS_*` settings from the environment (and an optional `.env`
//! file), opens the SQLite store, and walks the archive once. Every skipped
//! case is logged to stderr and to the log file.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::Context as _;
use clap::Parser;
use juris_crawl::{CrawlConfig, Session};
use juris_html::{HtmlNavigator, HttpSource};
use juris_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Crawl the jurisprudence archive into SQLite",
  long_about = "Crawl the jurisprudence archive into SQLite.\n\nConfigured through \
                JURIS_BASE_URL, JURIS_DATABASE, JURIS_TIMEOUT_SECS, JURIS_LOG_FILE and \
                JURIS_USER_AGENT."
)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let _ = Cli::parse();
  dotenvy::dotenv().ok();

  let cfg = CrawlConfig::load().context("failed to read configuration")?;
  init_tracing(&cfg.log_file)?;

  let store = SqliteStore::open(&cfg.database)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.database))?;

  let source = HttpSource::new(&cfg.user_agent, cfg.timeout())
    .context("failed to initialise navigator")?;
  let nav = HtmlNavigator::new(source, cfg.timeout());

  Session::new(nav, store, cfg.walk_options())
    .run()
    .await
    .context("crawl aborted")?;

  Ok(())
}

/// Log to stderr and append to `log_file`, filtered by `RUST_LOG`
/// (default `info`).
fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .with_context(|| format!("failed to open log file {log_file:?}"))?;

  tracing_subscriber::registry()
    .with(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
    .init();

  Ok(())
}
