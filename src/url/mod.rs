//! URL handling for the crawler
//!
//! This module provides the crawl [`Origin`] and the scope filter that turns
//! raw link targets into absolute in-scope URLs.

mod filter;
mod origin;

pub use filter::{filter_links, resolve_in_scope};
pub use origin::{parse_seed, Origin};
