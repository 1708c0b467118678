//! SQLite-backed content store.
//!
//! One `Store` wraps one connection. Every write validates its record,
//! resolves foreign keys and runs inside a transaction before anything is
//! committed. Per-entity operations live in the submodules:
//! - contents, job_categories, bios, announcements, programs, schedules
//! - articles: the byline data the bio cascade needs
//! - cascade: deleting a bio and backfilling its articles' bylines

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::domain::Validate;

pub mod announcements;
pub mod articles;
pub mod bios;
pub mod cascade;
pub mod contents;
pub mod error;
pub mod job_categories;
pub mod programs;
pub mod schedules;
pub mod schema;

pub use cascade::CascadeReport;
pub use error::{StoreError, StoreResult};

/// Connection-level settings
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// How long a write waits for another process's lock
    pub busy_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_millis(5_000),
        }
    }
}

/// The content store
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) a store at `path` with default settings
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, &StoreSettings::default())
    }

    /// Open (or create) a store at `path`
    pub fn open_with(path: impl AsRef<Path>, settings: &StoreSettings) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening store");
        let conn = Connection::open(path)?;
        Self::init(conn, settings)
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?, &StoreSettings::default())
    }

    fn init(conn: Connection, settings: &StoreSettings) -> StoreResult<Self> {
        conn.busy_timeout(settings.busy_timeout)?;
        // Set-null and cascade rules depend on SQLite enforcing foreign keys
        conn.pragma_update(None, "foreign_keys", true)?;

        let mut store = Self { conn };
        schema::migrate(&mut store.conn)?;
        Ok(store)
    }

    /// Underlying connection, for read-only inspection and maintenance
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Schema version of the open database
    pub fn schema_version(&self) -> StoreResult<i64> {
        Ok(schema::current_version(&self.conn)?)
    }
}

/// Run a record's field checks, logging rejections
pub(crate) fn validated<T: Validate>(entity: &'static str, record: &T) -> StoreResult<()> {
    record.validate().map_err(|err| {
        warn!(entity, error = %err, "Rejected invalid record");
        StoreError::from(err)
    })
}

/// Check that row `id` exists in `table`
pub(crate) fn row_exists(conn: &Connection, table: &str, id: i64) -> rusqlite::Result<bool> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", table);
    Ok(conn
        .query_row(&sql, [id], |_| Ok(()))
        .optional()?
        .is_some())
}

/// Fail with `Reference` when an optional foreign key points nowhere
pub(crate) fn ensure_reference(
    conn: &Connection,
    table: &str,
    entity: &'static str,
    id: Option<i64>,
) -> StoreResult<()> {
    if let Some(id) = id {
        if !row_exists(conn, table, id)? {
            return Err(StoreError::Reference { entity, id });
        }
    }
    Ok(())
}
