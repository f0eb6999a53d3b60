//! A [`Navigator`](juris_core::navigator::Navigator) over server-rendered
//! HTML.
//!
//! Activating a link fetches its target and pushes the page onto a history
//! stack; going back pops it. Pages come from a [`PageSource`]: live HTTP
//! through [`HttpSource`], or a fixed set of saved pages through
//! [`StaticPages`] for replaying a crawl offline. Scripts are never run.

#![allow(async_fn_in_trait)]

mod dom;
mod navigator;
mod source;

pub use navigator::HtmlNavigator;
pub use source::{HttpSource, PageSource, StaticPages};
