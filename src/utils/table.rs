//! Table rendering utilities for CLI outputs.

use super::formatting::strip_ansi;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
    pub align_right: bool,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            width: UnicodeWidthStr::width(header),
            align_right: false,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            align_right: true,
            ..Self::left(header)
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Cap for any single column; longer cells wrap onto extra lines.
    pub max_width: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            max_width: 40,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col
                .width
                .max(visible_width(cell).min(self.max_width));
        }
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self, separator: char) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width, col.align_right));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let wrapped: Vec<Vec<String>> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    textwrap::wrap(cell, col.width.max(1))
                        .into_iter()
                        .map(|c| c.into_owned())
                        .collect()
                })
                .collect();

            let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

            for line in 0..lines {
                for (i, col) in self.columns.iter().enumerate() {
                    let text = wrapped[i].get(line).map(String::as_str).unwrap_or("");
                    out.push_str(&pad(text, col.width, col.align_right));
                    out.push(' ');
                }
                out.push('\n');
            }
        }

        out
    }
}

fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

// format! pads by char count, which breaks on wide glyphs and color codes
fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(s)));
    if right {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}
