//! SQLite implementation of the portal store

use crate::extract::{EventItem, NewsItem};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{
    EventRecord, NewsRecord, PortalStore, StorageError, StorageResult,
};
use crate::ImportError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the portal database at the given path
    pub fn new(path: &Path) -> Result<Self, ImportError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, ImportError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn find_id(&self, table: &str, title: &str) -> StorageResult<Option<i64>> {
        let query = format!("SELECT id FROM {} WHERE title = ?1", table);
        let id = self
            .conn
            .query_row(&query, params![title], |row| row.get(0))
            .optional()
            .map_err(StorageError::Sqlite)?;
        Ok(id)
    }
}

impl PortalStore for SqliteStore {
    fn create_news_if_absent(&mut self, item: &NewsItem) -> StorageResult<bool> {
        if self.find_id("news", &item.title)?.is_some() {
            return Ok(false);
        }

        self.conn.execute(
            "INSERT INTO news (title, body, published) VALUES (?1, ?2, ?3)",
            params![item.title, item.body, item.published.to_rfc3339()],
        )?;
        Ok(true)
    }

    fn create_event_if_absent(&mut self, item: &EventItem) -> StorageResult<bool> {
        if self.find_id("events", &item.title)?.is_some() {
            return Ok(false);
        }

        self.conn.execute(
            "INSERT INTO events (title, description, start_time, end_time) VALUES (?1, ?2, ?3, ?4)",
            params![
                item.title,
                item.description,
                item.start_time.to_rfc3339(),
                item.end_time.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(true)
    }

    fn delete_news_containing(&mut self, marker: &str) -> StorageResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM news WHERE body LIKE '%' || ?1 || '%'",
            params![marker],
        )?;
        Ok(deleted)
    }

    fn delete_events_containing(&mut self, marker: &str) -> StorageResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM events WHERE description LIKE '%' || ?1 || '%'",
            params![marker],
        )?;
        Ok(deleted)
    }

    fn get_news_by_title(&self, title: &str) -> StorageResult<Option<NewsRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, body, published FROM news WHERE title = ?1",
                params![title],
                |row| {
                    Ok(NewsRecord {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        body: row.get(2)?,
                        published: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(record)
    }

    fn get_event_by_title(&self, title: &str) -> StorageResult<Option<EventRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, description, start_time, end_time FROM events WHERE title = ?1",
                params![title],
                |row| {
                    Ok(EventRecord {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        start_time: row.get(3)?,
                        end_time: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(record)
    }

    fn count_news(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM news", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_events(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn msk() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn sample_news(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            body: "<p>text</p><p><a href='https://www.rea.ru/news/1' target='_blank'>Читать на rea.ru</a></p>"
                .to_string(),
            published: msk().with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
        }
    }

    fn sample_event(title: &str) -> EventItem {
        EventItem {
            title: title.to_string(),
            description: "<p>when</p><p><a href='https://www.rea.ru/events/1' target='_blank'>Смотреть на rea.ru</a></p>".to_string(),
            start_time: msk().with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap(),
            end_time: None,
        }
    }

    #[test]
    fn test_create_news() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        assert!(store.create_news_if_absent(&sample_news("a")).unwrap());
        assert_eq!(store.count_news().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_title_is_not_created_or_updated() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        assert!(store.create_news_if_absent(&sample_news("a")).unwrap());

        let mut changed = sample_news("a");
        changed.body = "<p>different body</p>".to_string();
        assert!(!store.create_news_if_absent(&changed).unwrap());

        // Existing row keeps its original fields
        let stored = store.get_news_by_title("a").unwrap().unwrap();
        assert!(stored.body.contains("rea.ru"));
        assert_eq!(store.count_news().unwrap(), 1);
    }

    #[test]
    fn test_create_event_with_null_end_time() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        assert!(store.create_event_if_absent(&sample_event("e")).unwrap());

        let stored = store.get_event_by_title("e").unwrap().unwrap();
        assert_eq!(stored.end_time, None);
        assert!(stored.start_time.starts_with("2024-05-20"));
    }

    #[test]
    fn test_delete_by_marker_leaves_unmarked_rows() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.create_news_if_absent(&sample_news("imported")).unwrap();

        let mut local = sample_news("local");
        local.body = "<p>written by portal staff</p>".to_string();
        store.create_news_if_absent(&local).unwrap();

        let deleted = store.delete_news_containing("rea.ru").unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get_news_by_title("imported").unwrap().is_none());
        assert!(store.get_news_by_title("local").unwrap().is_some());
    }

    #[test]
    fn test_delete_events_by_marker() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.create_event_if_absent(&sample_event("e1")).unwrap();
        store.create_event_if_absent(&sample_event("e2")).unwrap();

        let deleted = store.delete_events_containing("rea.ru").unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.count_events().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = SqliteStore::new_in_memory().unwrap();
        assert!(store.get_news_by_title("nope").unwrap().is_none());
        assert!(store.get_event_by_title("nope").unwrap().is_none());
    }
}
