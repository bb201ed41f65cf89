//! Unified application error type.
//! All modules (db, source, core, cli, export) return AppError to keep the
//! error handling consistent. The report engine itself never returns one:
//! its failure modes collapse into empty results.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Spreadsheet error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Record source unavailable: {0}")]
    SourceUnavailable(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid operation type: {0}")]
    InvalidOperation(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // ---------------------------
    // Session / access
    // ---------------------------
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("No user selected (use --user or set current_user in the configuration)")]
    NoSession,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    // ---------------------------
    // Inventory logic
    // ---------------------------
    #[error("Insufficient stock for '{item}' in project {project}: on hand {on_hand}, requested {requested}")]
    InsufficientStock {
        item: String,
        project: String,
        on_hand: f64,
        requested: f64,
    },

    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
