//! SQLite access for the data source registry.
//!
//! Like the rest of the handlers, callers open a short-lived connection per
//! request with [`open`]; [`init`] creates the schema once at startup.

use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS data_sources (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    kind        TEXT NOT NULL,
    source_type TEXT NOT NULL,
    resource_id TEXT NOT NULL,
    gid         TEXT,
    is_default  INTEGER NOT NULL DEFAULT 0
);
";

pub fn open(path: &Path) -> Result<Connection, rusqlite::Error> {
    Connection::open(path)
}

pub fn init(path: &Path) -> Result<(), rusqlite::Error> {
    let conn = open(path)?;
    conn.execute_batch(SCHEMA)
}
