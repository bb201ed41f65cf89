//! Formatting utilities used for CLI and export outputs.

use crate::models::operation_type::OperationType;
use regex::Regex;
use std::sync::OnceLock;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Quantity with a fixed number of decimals; whole numbers stay whole
/// (`12` rather than `12.00`).
pub fn fmt_quantity(q: f64, decimals: usize) -> String {
    // -0.0 would print as "-0"
    let q = if q == 0.0 { 0.0 } else { q };
    if q.fract() == 0.0 {
        format!("{:.0}", q)
    } else {
        format!("{:.*}", decimals, q)
    }
}

/// Same as [`fmt_quantity`] with an explicit `+` on positive values.
pub fn fmt_signed_quantity(q: f64, decimals: usize) -> String {
    if q > 0.0 {
        format!("+{}", fmt_quantity(q, decimals))
    } else {
        fmt_quantity(q, decimals)
    }
}

/// Label and ANSI color for an operation type, `--` when the cell is empty.
pub fn describe_operation(op: Option<OperationType>) -> (String, &'static str) {
    match op {
        Some(OperationType::Inbound) => ("inbound".into(), "\x1b[32m"),
        Some(OperationType::Outbound) => ("outbound".into(), "\x1b[31m"),
        Some(OperationType::AdjustIncrease) => ("adj +".into(), "\x1b[36m"),
        Some(OperationType::AdjustDecrease) => ("adj -".into(), "\x1b[35m"),
        None => ("--".into(), "\x1b[90m"),
    }
}

/// Text without ANSI color codes, for width math.
pub fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));
    re.replace_all(s, "").into_owned()
}
