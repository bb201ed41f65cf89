use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

const REQUIRED_TABLES: [&str; 3] = ["log", "users", "records"];

/// Bring the schema up to date and make sure every table the commands
/// read from is present. Returns how many migrations were applied.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    let applied = run_pending_migrations(conn)?;

    for table in REQUIRED_TABLES {
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        if found == 0 {
            return Err(AppError::Migration(format!("table '{table}' missing after migrations")));
        }
    }

    Ok(applied)
}
