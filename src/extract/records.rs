//! Output records produced by the extractor
//!
//! These exist only transiently: the orchestrator consumes them immediately
//! with a natural-key upsert, so they carry no identity of their own.

use chrono::{DateTime, FixedOffset};

/// One imported news article
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    /// Natural key; dedup within a run and upsert both go by title
    pub title: String,

    /// Up to the configured number of content fragments plus a trailing
    /// source link
    pub body: String,

    /// Publication date; falls back to the import time when the source
    /// page has no parseable date
    pub published: DateTime<FixedOffset>,
}

/// One imported event
#[derive(Debug, Clone, PartialEq)]
pub struct EventItem {
    /// Natural key
    pub title: String,

    /// Same construction as a news body
    pub description: String,

    /// Mandatory; records without a parseable date are dropped
    pub start_time: DateTime<FixedOffset>,

    /// The source never publishes an end time; the column exists for the
    /// portal's calendar
    pub end_time: Option<DateTime<FixedOffset>>,
}
