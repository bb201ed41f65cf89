use crate::db::migrate::{applied_versions, known_migrations};
use crate::db::pool::DbPool;
use crate::db::queries::count_records;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) SCHEMA
    //
    let applied = applied_versions(&pool.conn)?.len();
    println!(
        "{}• Migrations:{} {}/{}",
        CYAN,
        RESET,
        applied,
        known_migrations()
    );

    //
    // 3) TOTALS
    //
    let records = count_records(&pool.conn)?;
    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let projects: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT project_id) FROM records",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Records:{} {}{}{}", CYAN, RESET, GREEN, records, RESET);
    println!("{}• Users:{} {}", CYAN, RESET, users);
    println!("{}• Projects:{} {}", CYAN, RESET, projects);

    //
    // 4) DATE RANGE (text order works for ISO dates)
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM records WHERE date <> '' ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM records WHERE date <> '' ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
