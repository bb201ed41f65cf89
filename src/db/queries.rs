use crate::errors::{AppError, AppResult};
use crate::models::record::RawRecord;
use crate::models::user::User;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

// ---------------------------
// records
// ---------------------------

/// Load every record row, in insertion order. Rows are returned raw:
/// validation happens in the source layer.
pub fn load_raw_records(conn: &Connection) -> AppResult<Vec<RawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, operation, item_name, category, quantity,
                actor_username, project_id, note
         FROM records
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_record_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_record_row(row: &Row) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: Some(row.get("id")?),
        date: row.get("date")?,
        operation: row.get("operation")?,
        item_name: row.get("item_name")?,
        category: row.get("category")?,
        quantity: row.get("quantity")?,
        actor_username: row.get("actor_username")?,
        project_id: row.get("project_id")?,
        note: row.get("note")?,
    })
}

/// Insert a record and return its new id. Any id carried by `rec` is ignored.
pub fn insert_record(conn: &Connection, rec: &RawRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO records (date, operation, item_name, category, quantity,
                              actor_username, project_id, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.date,
            rec.operation,
            rec.item_name,
            rec.category,
            rec.quantity,
            rec.actor_username,
            rec.project_id,
            rec.note,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete by id. Returns false when no such record exists.
pub fn delete_record(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn count_records(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?)
}

// ---------------------------
// users
// ---------------------------

fn map_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        project_id: row.get("project_id")?,
        is_admin: row.get::<_, i32>("is_admin")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn find_user(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, project_id, is_admin, created_at
         FROM users WHERE username = ?1",
    )?;
    Ok(stmt.query_row([username.trim()], map_user_row).optional()?)
}

pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, project_id, is_admin, created_at
         FROM users ORDER BY username ASC",
    )?;
    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_user(
    conn: &Connection,
    username: &str,
    project_id: &str,
    is_admin: bool,
) -> AppResult<i64> {
    if find_user(conn, username)?.is_some() {
        return Err(AppError::DuplicateUser(username.to_string()));
    }

    conn.execute(
        "INSERT INTO users (username, project_id, is_admin, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            username.trim(),
            project_id.trim(),
            if is_admin { 1 } else { 0 },
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_user(conn: &Connection, username: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM users WHERE username = ?1", [username.trim()])?;
    Ok(n > 0)
}

pub fn count_admins(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM users WHERE is_admin = 1",
        [],
        |row| row.get(0),
    )?)
}

// ---------------------------
// log
// ---------------------------

/// (id, date, operation, target, message), oldest first.
pub type LogRow = (i64, String, String, String, String);

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
