// src/export/pdf_export.rs

use crate::core::aggregate::Aggregates;
use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, records_to_table, summary_lines};
use crate::export::pdf::PdfManager;
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Export PDF: the filtered rows as a table, totals underneath.
pub(crate) fn export_pdf(
    records: &[RecordExport],
    agg: &Aggregates,
    path: &Path,
    title: &str,
    decimals: usize,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let rows = records_to_table(records, decimals);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &rows, &summary_lines(agg, decimals));

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
