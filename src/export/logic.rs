// src/export/logic.rs

use crate::core::report::ReportEngine;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::identity::Identity;
use crate::models::selection::FilterSelection;
use crate::source::RecordSource;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the report for `identity` / `selection` to `file`.
    ///
    /// The same engine as `report` produces the rows, so exports obey the
    /// same scoping. An empty result still produces a file (headers and zero
    /// totals). Returns the number of exported rows.
    pub fn export(
        source: &dyn RecordSource,
        identity: Option<&Identity>,
        selection: &FilterSelection,
        format: ExportFormat,
        file: &str,
        force: bool,
        decimals: usize,
    ) -> AppResult<usize> {
        let path: PathBuf = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        let report = ReportEngine::from_source(source, identity, selection);
        let rows: Vec<RecordExport> = report.records.iter().map(RecordExport::from).collect();

        if rows.is_empty() {
            warning(format!(
                "No records match the selected filters ({}).",
                report.counter_label()
            ));
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &report.aggregates, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &report.aggregates, &path, decimals)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(selection);
                export_pdf(&rows, &report.aggregates, &path, &title, decimals)?
            }
        }

        Ok(rows.len())
    }
}

/// PDF title from the active filters.
fn build_pdf_title(sel: &FilterSelection) -> String {
    let mut title = String::from("Inventory movements");

    if let Some(item) = sel.item_name.value() {
        title.push_str(&format!(" of {item}"));
    }
    if let Some(cat) = sel.category.value() {
        title.push_str(&format!(" [{cat}]"));
    }
    if let Some(p) = sel.project_id.value() {
        title.push_str(&format!(" - project {p}"));
    }

    match (sel.date_from, sel.date_to) {
        (Some(f), Some(t)) if f == t => title.push_str(&format!(" on {f}")),
        (Some(f), Some(t)) => title.push_str(&format!(" from {f} to {t}")),
        (Some(f), None) => title.push_str(&format!(" since {f}")),
        (None, Some(t)) => title.push_str(&format!(" until {t}")),
        (None, None) => {}
    }

    title
}
