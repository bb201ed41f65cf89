// src/export/xlsx.rs

use crate::core::aggregate::Aggregates;
use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{get_headers, record_to_row, summary_lines};
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

// Column positions, see model::get_headers()
const COL_ID: usize = 0;
const COL_DATE: usize = 1;
const COL_QUANTITY: usize = 5;

/// Export XLSX with styling, auto column widths and a totals block.
pub(crate) fn export_xlsx(
    records: &[RecordExport],
    agg: &Aggregates,
    path: &Path,
    decimals: usize,
) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Report").map_err(to_app_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, rec) in records.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in record_to_row(rec, decimals).iter().enumerate() {
            let cell = match col {
                COL_ID => Cell::Number(rec.id as f64),
                COL_QUANTITY => Cell::Number(rec.quantity),
                COL_DATE => match parse_to_excel_date(value) {
                    Some((fmt, serial)) => Cell::Date(fmt, serial),
                    None => Cell::Text(value),
                },
                _ => Cell::Text(value),
            };

            write_cell(worksheet, row, col as u16, cell, band_color)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // ---------------------------
    // Totals
    // ---------------------------
    let bold = Format::new().set_bold();
    let first_total_row = records.len() as u32 + 2;

    for (i, line) in summary_lines(agg, decimals).iter().enumerate() {
        worksheet
            .write_with_format(first_total_row + i as u32, 0, line.as_str(), &bold)
            .map_err(to_app_error)?;
    }

    // ---------------------------
    // Set column widths
    // ---------------------------
    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(60) as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

enum Cell<'a> {
    Number(f64),
    Date(&'static str, f64),
    Text(&'a str),
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: Cell<'_>,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell {
        Cell::Number(n) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, n, &fmt)
        }
        Cell::Date(num_format, serial) => {
            let fmt = base.set_num_format(num_format);
            worksheet.write_with_format(row, col, serial, &fmt)
        }
        Cell::Text(s) => worksheet.write_with_format(row, col, s, &base),
    }
    .map_err(to_app_error)?;

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
