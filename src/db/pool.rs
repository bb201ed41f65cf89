//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
    pub path: String,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: String::from(":memory:"),
        })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }
}
