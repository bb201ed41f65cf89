//! Status lines printed around command output. Errors go to stderr.

use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt::Display;

const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (CYAN, "ℹ️"),
            Level::Success => (GREEN, "✅"),
            Level::Warning => (YELLOW, "⚠️"),
            Level::Error => (RED, "❌"),
        }
    }
}

fn emit(level: Level, msg: &dyn Display) {
    let (color, icon) = level.style();
    let line = format!("{color}{BOLD}{icon} {RESET}{msg}");
    match level {
        Level::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: Display>(msg: T) {
    emit(Level::Info, &msg);
}

pub fn success<T: Display>(msg: T) {
    emit(Level::Success, &msg);
}

pub fn warning<T: Display>(msg: T) {
    emit(Level::Warning, &msg);
}

pub fn error<T: Display>(msg: T) {
    emit(Level::Error, &msg);
}

/// Title above a table, underlined to its own width.
pub fn header<T: Display>(msg: T) {
    let title = msg.to_string();
    let rule = "=".repeat(title.chars().count().max(8));
    println!("{CYAN}{BOLD}{title}\n{rule}{RESET}");
}
