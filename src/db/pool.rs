//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! The application issues one statement at a time, so a single connection
//! is all the "pool" holds. Foreign keys are enforced on every connection.

use crate::errors::AppResult;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use tracing::debug;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        debug!(path, "opening database");
        let conn = Connection::open(Path::new(path))?;
        Self::configure(conn)
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> AppResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// Run `func` inside a transaction: committed when it returns `Ok`,
    /// rolled back (on drop) when it returns `Err`.
    pub fn transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> AppResult<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}
