use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// One schema step. Applied at most once; the `log` table remembers it.
struct Migration {
    version: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_users",
        description: "Created users table",
        apply: create_users_table,
    },
    Migration {
        version: "20250301_0002_create_records",
        description: "Created records table",
        apply: create_records_table,
    },
];

/// Ensure that the `log` table exists: it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn create_users_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            project_id  TEXT NOT NULL DEFAULT '',
            is_admin    INTEGER NOT NULL DEFAULT 0 CHECK(is_admin IN (0,1)),
            created_at  TEXT NOT NULL
        );
        "#,
    )
}

fn create_records_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            date            TEXT NOT NULL DEFAULT '',
            operation       TEXT NOT NULL DEFAULT '' CHECK(operation IN ('','in','out','adj+','adj-')),
            item_name       TEXT NOT NULL,
            category        TEXT NOT NULL DEFAULT 'unspecified',
            quantity        TEXT NOT NULL DEFAULT '0',
            actor_username  TEXT NOT NULL DEFAULT '',
            project_id      TEXT NOT NULL DEFAULT '',
            note            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_project_item ON records(project_id, item_name);
        CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in the `log` table, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
/// Returns how many were applied in this call.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        (m.apply)(conn)
            .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;

        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}

/// Number of known migrations, for `db --info`.
pub fn known_migrations() -> usize {
    MIGRATIONS.len()
}
