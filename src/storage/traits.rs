//! Storage trait and error types
//!
//! The portal's relational store is a collaborator of the importer, reached
//! through a narrow trait: insert-if-absent by title for each entity kind,
//! marker-based deletion for the --clear path, and read-back helpers.

use crate::extract::{EventItem, NewsItem};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored news row as the portal sees it
#[derive(Debug, Clone)]
pub struct NewsRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub published: String,
}

/// A stored event row as the portal sees it
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: Option<String>,
}

/// Trait for the portal's content store
pub trait PortalStore {
    /// Inserts the news item unless a row with the same title exists.
    /// Existing rows are left untouched. Returns true when a row was
    /// created.
    fn create_news_if_absent(&mut self, item: &NewsItem) -> StorageResult<bool>;

    /// Inserts the event unless a row with the same title exists. Returns
    /// true when a row was created.
    fn create_event_if_absent(&mut self, item: &EventItem) -> StorageResult<bool>;

    /// Deletes news whose body contains the given substring. Returns the
    /// number of deleted rows.
    fn delete_news_containing(&mut self, marker: &str) -> StorageResult<usize>;

    /// Deletes events whose description contains the given substring.
    /// Returns the number of deleted rows.
    fn delete_events_containing(&mut self, marker: &str) -> StorageResult<usize>;

    /// Looks up a news row by its natural key
    fn get_news_by_title(&self, title: &str) -> StorageResult<Option<NewsRecord>>;

    /// Looks up an event row by its natural key
    fn get_event_by_title(&self, title: &str) -> StorageResult<Option<EventRecord>>;

    /// Total stored news rows
    fn count_news(&self) -> StorageResult<u64>;

    /// Total stored event rows
    fn count_events(&self) -> StorageResult<u64>;
}
