//! Local spreadsheet backend.
//!
//! The file has a header row naming the [`RawRecord`] columns. Column order
//! is free and unknown columns are ignored. A sheet without an `id` column
//! is accepted: row numbers stand in for ids until the file is rewritten.
//! Appending to a sheet in any other layout rewrites it in the canonical one.

use super::{Ingested, Rejected, RecordSource, ingest_rows};
use crate::errors::{AppError, AppResult};
use crate::models::record::{CSV_HEADERS, RawRecord, Record};
use crate::utils::path::expand_tilde;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: expand_tilde(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows with their 1-based data row number; ids filled in where missing.
    /// Rows the CSV layer cannot even decode are returned as rejected.
    fn read_rows(&self) -> AppResult<(Vec<(usize, RawRecord)>, Vec<Rejected>)> {
        if !self.path.exists() {
            return Err(AppError::SourceUnavailable(format!(
                "spreadsheet not found: {}",
                self.path.display()
            )));
        }

        let mut rdr = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| AppError::SourceUnavailable(format!("{}: {e}", self.path.display())))?;

        let mut rows = Vec::new();
        let mut rejected = Vec::new();

        for (idx, result) in rdr.deserialize::<RawRecord>().enumerate() {
            let row = idx + 1;
            match result {
                Ok(mut raw) => {
                    raw.id.get_or_insert(row as i64);
                    rows.push((row, raw));
                }
                Err(e) => rejected.push(Rejected {
                    row,
                    reason: e.to_string(),
                }),
            }
        }

        Ok((rows, rejected))
    }

    fn next_id(rows: &[(usize, RawRecord)]) -> i64 {
        rows.iter().filter_map(|(_, r)| r.id).max().unwrap_or(0) + 1
    }

    /// Header equal to [`CSV_HEADERS`] and a final newline: rows can be
    /// appended as they are.
    fn is_canonical(&self) -> AppResult<bool> {
        let bytes = fs::read(&self.path)?;
        if !bytes.ends_with(b"\n") {
            return Ok(false);
        }

        let mut rdr = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_reader(bytes.as_slice());

        Ok(rdr.headers()?.iter().eq(CSV_HEADERS))
    }

    /// Rewrite the whole sheet with explicit ids.
    fn write_all(&self, rows: &[RawRecord]) -> AppResult<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut wtr = ::csv::Writer::from_path(&tmp)?;
            if rows.is_empty() {
                wtr.write_record(CSV_HEADERS)?;
            }
            for r in rows {
                wtr.serialize(r)?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn load(&self) -> AppResult<Ingested> {
        let (rows, decode_errors) = self.read_rows()?;
        let mut out = ingest_rows(rows);

        out.rejected.extend(decode_errors);
        out.rejected.sort_by_key(|r| r.row);
        Ok(out)
    }

    fn append(&mut self, rec: &Record) -> AppResult<i64> {
        let fresh = !self.path.exists() || fs::metadata(&self.path)?.len() == 0;

        if fresh {
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }

            let mut raw = rec.to_raw();
            raw.id = Some(1);
            self.write_all(&[raw])?;
            return Ok(1);
        }

        let (rows, decode_errors) = self.read_rows()?;
        let id = Self::next_id(&rows);

        let mut raw = rec.to_raw();
        raw.id = Some(id);

        if self.is_canonical()? {
            let file = OpenOptions::new().append(true).open(&self.path)?;
            let mut wtr = ::csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file);
            wtr.serialize(&raw)?;
            wtr.flush()?;
            return Ok(id);
        }

        // Foreign layout: rewrite the sheet in canonical form
        if !decode_errors.is_empty() {
            return Err(AppError::InvalidRecord(format!(
                "{} has {} unreadable row(s); fix them before adding",
                self.path.display(),
                decode_errors.len()
            )));
        }

        let mut all: Vec<RawRecord> = rows.into_iter().map(|(_, r)| r).collect();
        all.push(raw);
        self.write_all(&all)?;

        Ok(id)
    }

    fn delete(&mut self, id: i64) -> AppResult<bool> {
        let (rows, decode_errors) = self.read_rows()?;

        // Never drop rows we could not decode
        if !decode_errors.is_empty() {
            return Err(AppError::InvalidRecord(format!(
                "{} has {} unreadable row(s); fix them before deleting",
                self.path.display(),
                decode_errors.len()
            )));
        }

        let before = rows.len();
        let kept: Vec<RawRecord> = rows
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| r.id != Some(id))
            .collect();

        if kept.len() == before {
            return Ok(false);
        }

        self.write_all(&kept)?;
        Ok(true)
    }
}
