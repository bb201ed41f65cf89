// src/export/json_csv.rs

use crate::core::aggregate::Aggregates;
use crate::errors::{AppError, AppResult};
use crate::export::{RecordExport, notify_export_success};
use crate::models::record::CSV_HEADERS;
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: JsonSummary,
    records: &'a [RecordExport],
}

#[derive(Serialize)]
struct JsonSummary {
    count: usize,
    inbound: f64,
    outbound: f64,
    adjust_increase: f64,
    adjust_decrease: f64,
    net_balance: f64,
}

/// Export JSON pretty-printed: totals first, then the rows.
pub(crate) fn export_json(records: &[RecordExport], agg: &Aggregates, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let report = JsonReport {
        summary: JsonSummary {
            count: agg.count,
            inbound: agg.inbound,
            outbound: agg.outbound,
            adjust_increase: agg.adjust_increase,
            adjust_decrease: agg.adjust_decrease,
            net_balance: agg.net_balance(),
        },
        records,
    };

    let json_data = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with the spreadsheet column layout, so the file can be
/// imported back.
pub(crate) fn export_csv(records: &[RecordExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    // serde only writes the header along with the first row
    if records.is_empty() {
        wtr.write_record(CSV_HEADERS)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    for item in records {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
