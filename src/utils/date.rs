use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse the date cell of a record: `YYYY-MM-DD`, optionally followed by a
/// time separated by a space or `T`. The time may carry fractional seconds
/// and a `Z` / `±HH:MM` offset (RFC 3339). It is validated but dropped.
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let (day_part, time_part) = match s.find([' ', 'T']) {
        Some(idx) => (&s[..idx], Some(s[idx + 1..].trim())),
        None => (s, None),
    };

    // chrono accepts unpadded fields, spreadsheets sometimes don't pad
    if day_part.len() != 10 {
        return None;
    }

    let day = NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()?;

    if let Some(t) = time_part
        && !t.is_empty()
    {
        let t = strip_utc_offset(t)?;
        if NaiveTime::parse_from_str(t, "%H:%M:%S%.f").is_err()
            && NaiveTime::parse_from_str(t, "%H:%M").is_err()
        {
            return None;
        }
    }

    Some(day)
}

/// `08:30:00Z` / `08:30:00+02:00` -> `08:30:00`. `None` for a broken offset.
fn strip_utc_offset(t: &str) -> Option<&str> {
    if let Some(rest) = t.strip_suffix(['Z', 'z']) {
        return Some(rest.trim_end());
    }

    match t.rfind(['+', '-']) {
        Some(idx) => {
            let offset = &t[idx + 1..];
            let valid = offset.len() == 5
                && NaiveTime::parse_from_str(&format!("{offset}:00"), "%H:%M:%S").is_ok();
            valid.then(|| t[..idx].trim_end())
        }
        None => Some(t),
    }
}

/// Parse a date typed by the user (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Optional bound: empty input means unbounded.
pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match input {
        Some(s) if !s.trim().is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}
