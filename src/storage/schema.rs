//! Database schema for the portal's imported content

use rusqlite::Connection;

/// Creates the news and events tables if they do not exist.
///
/// Titles carry a UNIQUE constraint: they are the natural key the importer
/// upserts by. Timestamps are stored as RFC 3339 text.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS news (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            body TEXT NOT NULL,
            published TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_news_published ON news(published);
        CREATE INDEX IF NOT EXISTS idx_events_start_time ON events(start_time);
        ",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        // Idempotent
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('news', 'events')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_title_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO news (title, body, published) VALUES ('a', 'b', 'c')",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO news (title, body, published) VALUES ('a', 'x', 'y')",
            [],
        );
        assert!(duplicate.is_err());
    }
}
