//! Crawler for the Year → Month → Case jurisprudence archive.
//!
//! [`Session`] ties a [`Navigator`](juris_core::navigator::Navigator) and a
//! [`RecordStore`](juris_core::store::RecordStore) to one run of the
//! [`Walker`], which opens every case, hands it to the [`extract`] heuristics
//! and stores the result through [`persist`].

pub mod config;
pub mod extract;
pub mod persist;
pub mod session;
pub mod walker;

pub use config::CrawlConfig;
pub use session::Session;
pub use walker::{CaseOutcome, CrawlStats, Level, WalkOptions, Walker};
