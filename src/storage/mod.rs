//! Storage backends for imported content
//!
//! The importer talks to the portal's store through the `PortalStore`
//! trait; `SqliteStore` is the production implementation.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{EventRecord, NewsRecord, PortalStore, StorageError, StorageResult};
