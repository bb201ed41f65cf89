//! Typed inventory record and its ingestion step.
//!
//! Every record handed over by a source goes through [`Record::from_raw`]:
//! that is the only place where spreadsheet text is validated. A broken date
//! is tolerated (kept as [`RecordDate::Malformed`]); a missing item name, a
//! negative quantity or an unknown operation reject the whole row.

use super::operation_type::OperationType;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_record_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category used when a row leaves the field empty.
pub const UNSPECIFIED_CATEGORY: &str = "unspecified";

/// Column names of the spreadsheet layout, in write order.
pub const CSV_HEADERS: [&str; 9] = [
    "id",
    "date",
    "operation",
    "item_name",
    "category",
    "quantity",
    "actor_username",
    "project_id",
    "note",
];

/// Date cell of a record, as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDate {
    Valid { day: NaiveDate, raw: String },
    Malformed(String),
}

impl RecordDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match parse_record_date(raw) {
            Some(day) => RecordDate::Valid {
                day,
                raw: raw.to_string(),
            },
            None => RecordDate::Malformed(raw.to_string()),
        }
    }

    /// Calendar day, time component dropped. `None` when malformed.
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            RecordDate::Valid { day, .. } => Some(*day),
            RecordDate::Malformed(_) => None,
        }
    }

    /// Original text, as stored in the source.
    pub fn as_str(&self) -> &str {
        match self {
            RecordDate::Valid { raw, .. } => raw,
            RecordDate::Malformed(raw) => raw,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, RecordDate::Malformed(_))
    }
}

/// Flat, untyped row exactly as found in a spreadsheet or a DB row.
///
/// Column names double as the CSV header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub actor_username: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub note: String,
}

/// One transaction line: a stock movement of an item inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub date: RecordDate,
    pub operation: Option<OperationType>,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub actor_username: String,
    pub project_id: String,
    pub note: String,
}

impl Record {
    /// Validate a raw row. `fallback_id` is used when the row carries no id
    /// (e.g. a spreadsheet without an id column).
    pub fn from_raw(raw: &RawRecord, fallback_id: i64) -> AppResult<Self> {
        let item_name = raw.item_name.trim();
        if item_name.is_empty() {
            return Err(AppError::InvalidRecord("item name is empty".into()));
        }

        let quantity = parse_quantity(&raw.quantity)?;

        let op_raw = raw.operation.trim();
        let operation = if op_raw.is_empty() {
            None
        } else {
            Some(
                OperationType::op_from_str(op_raw)
                    .ok_or_else(|| AppError::InvalidOperation(op_raw.to_string()))?,
            )
        };

        let category = match raw.category.trim() {
            "" => UNSPECIFIED_CATEGORY.to_string(),
            c => c.to_string(),
        };

        Ok(Record {
            id: raw.id.unwrap_or(fallback_id),
            date: RecordDate::parse(&raw.date),
            operation,
            item_name: item_name.to_string(),
            category,
            quantity,
            actor_username: raw.actor_username.trim().to_string(),
            project_id: raw.project_id.trim().to_string(),
            note: raw.note.clone(),
        })
    }

    /// Back to the flat form written by sources and exporters.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            id: Some(self.id),
            date: self.date.as_str().to_string(),
            operation: self
                .operation
                .map(|op| op.to_db_str().to_string())
                .unwrap_or_default(),
            item_name: self.item_name.clone(),
            category: self.category.clone(),
            quantity: format_quantity_raw(self.quantity),
            actor_username: self.actor_username.clone(),
            project_id: self.project_id.clone(),
            note: self.note.clone(),
        }
    }

    /// Quantity with the sign of its operation; 0 when the operation is empty.
    pub fn signed_quantity(&self) -> f64 {
        self.operation
            .map(|op| op.sign() * self.quantity)
            .unwrap_or(0.0)
    }
}

/// Parse a quantity cell. Spreadsheets written with a decimal comma
/// (`"2,5"`) are accepted.
pub fn parse_quantity(s: &str) -> AppResult<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Err(AppError::InvalidQuantity("empty".into()));
    }

    let q: f64 = t
        .replace(',', ".")
        .parse()
        .map_err(|_| AppError::InvalidQuantity(t.to_string()))?;

    if !q.is_finite() || q < 0.0 {
        return Err(AppError::InvalidQuantity(t.to_string()));
    }

    Ok(q)
}

/// Shortest text that reads back to the same quantity (`3` rather than `3.0`).
pub fn format_quantity_raw(q: f64) -> String {
    if q.fract() == 0.0 && q.abs() < 1e15 {
        format!("{}", q as i64)
    } else {
        q.to_string()
    }
}
