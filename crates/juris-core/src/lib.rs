//! Core types and trait definitions for the juris case crawler.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! crawler depends on the [`Navigator`](navigator::Navigator) and
//! [`RecordStore`](store::RecordStore) abstractions defined here, never on a
//! concrete backend.

// `Navigator` futures are driven on one task and need no `Send` bound.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod navigator;
pub mod record;
pub mod store;

pub use error::{Error, Result};
