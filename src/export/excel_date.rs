// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Interpret a record date cell as an Excel date, returning the number
/// format and the Excel serial. Cells that are not dates give `None` and are
/// written as text.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(("yyyy-mm-dd hh:mm", excel_serial(&dt)?));
        }
    }

    // Only full ISO dates: "2024" or "3" must stay numbers
    if s.len() == 10
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
    {
        return Some(("yyyy-mm-dd", excel_serial(&d.and_time(NaiveTime::MIN))?));
    }

    None
}

fn excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let secs = (*dt - excel_epoch).num_seconds() as f64;
    Some(secs / 86400.0)
}
