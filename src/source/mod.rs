//! Record sources: where transaction rows come from and go to.
//!
//! Both backends hand out raw rows; [`ingest`] turns them into typed
//! records, collecting the rows it had to reject instead of failing the
//! whole load.

pub mod csv;
pub mod sqlite;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::models::record::{RawRecord, Record};

pub use self::csv::CsvSource;
pub use self::sqlite::SqliteSource;

/// A row that did not pass validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// 1-based position of the row in its source
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct Ingested {
    pub records: Vec<Record>,
    pub rejected: Vec<Rejected>,
}

/// Validate raw rows in order. Rows without an id get their position.
pub fn ingest(raws: &[RawRecord]) -> Ingested {
    ingest_rows(raws.iter().cloned().enumerate().map(|(i, r)| (i + 1, r)))
}

/// Same as [`ingest`] for rows that already carry their 1-based position.
pub fn ingest_rows(rows: impl IntoIterator<Item = (usize, RawRecord)>) -> Ingested {
    let mut out = Ingested::default();

    for (row, raw) in rows {
        match Record::from_raw(&raw, row as i64) {
            Ok(rec) => out.records.push(rec),
            Err(e) => out.rejected.push(Rejected {
                row,
                reason: e.to_string(),
            }),
        }
    }

    out
}

pub trait RecordSource {
    /// Human readable location, for messages.
    fn describe(&self) -> String;

    /// Read and validate every row.
    fn load(&self) -> AppResult<Ingested>;

    fn get_records(&self) -> AppResult<Vec<Record>> {
        Ok(self.load()?.records)
    }

    /// Store a new record; returns the id it was given.
    fn append(&mut self, rec: &Record) -> AppResult<i64>;

    /// Remove a record by id; false when it does not exist.
    fn delete(&mut self, id: i64) -> AppResult<bool>;
}

/// Open the backend selected in the configuration.
pub fn open_source(cfg: &Config) -> AppResult<Box<dyn RecordSource>> {
    Ok(match cfg.backend {
        Backend::Sqlite => Box::new(SqliteSource::open(&cfg.database)?),
        Backend::Csv => Box::new(CsvSource::new(&cfg.csv_file)),
    })
}
