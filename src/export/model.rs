// src/export/model.rs

use crate::core::aggregate::Aggregates;
use crate::models::record::Record;
use crate::utils::formatting::fmt_quantity;
use serde::Serialize;

/// Flat row used by every export format.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub actor_username: String,
    pub project_id: String,
    pub note: String,
}

impl From<&Record> for RecordExport {
    fn from(r: &Record) -> Self {
        Self {
            id: r.id,
            date: r.date.as_str().to_string(),
            operation: r
                .operation
                .map(|op| op.op_as_str().to_string())
                .unwrap_or_default(),
            item_name: r.item_name.clone(),
            category: r.category.clone(),
            quantity: r.quantity,
            actor_username: r.actor_username.clone(),
            project_id: r.project_id.clone(),
            note: r.note.clone(),
        }
    }
}

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "operation",
        "item",
        "category",
        "quantity",
        "actor",
        "project",
        "note",
    ]
}

pub(crate) fn record_to_row(e: &RecordExport, decimals: usize) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.clone(),
        e.operation.clone(),
        e.item_name.clone(),
        e.category.clone(),
        fmt_quantity(e.quantity, decimals),
        e.actor_username.clone(),
        e.project_id.clone(),
        e.note.clone(),
    ]
}

pub(crate) fn records_to_table(records: &[RecordExport], decimals: usize) -> Vec<Vec<String>> {
    records.iter().map(|r| record_to_row(r, decimals)).collect()
}

/// Totals printed under tables ("Inbound: 12", ...).
pub(crate) fn summary_lines(agg: &Aggregates, decimals: usize) -> Vec<String> {
    vec![
        format!("Records: {}", agg.count),
        format!("Inbound: {}", fmt_quantity(agg.inbound, decimals)),
        format!("Outbound: {}", fmt_quantity(agg.outbound, decimals)),
        format!(
            "Adjustments: +{} / -{}",
            fmt_quantity(agg.adjust_increase, decimals),
            fmt_quantity(agg.adjust_decrease, decimals)
        ),
        format!("Net balance: {}", fmt_quantity(agg.net_balance(), decimals)),
    ]
}
