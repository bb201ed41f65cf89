// src/utils/range.rs

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse a `--period` shortcut into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(bad(r, "start and end must have same format"));
        }

        let (d1, _) = period_bounds(start).ok_or_else(|| bad(r, "invalid start"))?;
        let (_, d2) = period_bounds(end).ok_or_else(|| bad(r, "invalid end"))?;

        if d1 > d2 {
            return Err(bad(r, "start is after end"));
        }
        Ok((d1, d2))
    } else {
        period_bounds(r).ok_or_else(|| bad(r, "unsupported --period format"))
    }
}

/// First and last day covered by a single YYYY / YYYY-MM / YYYY-MM-DD token.
fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p.get(0..4)?.parse().ok()?;
            let m: u32 = p.get(5..7)?.parse().ok()?;
            if p.as_bytes()[4] != b'-' {
                return None;
            }
            let first = NaiveDate::from_ymd_opt(y, m, 1)?;
            let last = NaiveDate::from_ymd_opt(y, m, month_last_day(y, m)?)?;
            Some((first, last))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

fn bad(input: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("{input} ({why})"))
}
