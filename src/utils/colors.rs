/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Balance color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_balance(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Grey out placeholder cells (`--`, empty, zero).
pub fn colorize_optional(value: &str) -> String {
    let t = value.trim();
    if t.is_empty() || t == "--" || t == "0" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Marks a filter that the user cannot change.
pub fn locked(value: &str) -> String {
    format!("{YELLOW}{value} 🔒{RESET}")
}
