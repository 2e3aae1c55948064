//! Content extraction from the source site
//!
//! This module turns fetched listing and detail pages into importable
//! records:
//! - `section` drives the per-listing pipeline (link discovery, title
//!   dedup, per-detail fetch)
//! - `content` extracts bounded, trash-filtered content blocks
//! - `dates` parses localized Russian dates
//! - `records` defines the output entities

mod content;
mod dates;
mod records;
mod section;

pub use content::{collapse_text, collect_fragments, find_date_text, select_container, TrashFilter};
pub use dates::{now_in, parse_ru_date, RuDate};
pub use records::{EventItem, NewsItem};
pub use section::SectionExtractor;
