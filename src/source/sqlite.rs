use super::{Ingested, RecordSource, ingest};
use crate::db::pool::DbPool;
use crate::db::queries::{delete_record, insert_record, load_raw_records};
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;

/// Records kept in the `records` table of the application database.
pub struct SqliteSource {
    pool: DbPool,
}

impl SqliteSource {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RecordSource for SqliteSource {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.pool.path)
    }

    fn load(&self) -> AppResult<Ingested> {
        let raws = load_raw_records(&self.pool.conn)
            .map_err(|e| AppError::SourceUnavailable(format!("{}: {e}", self.describe())))?;
        Ok(ingest(&raws))
    }

    fn append(&mut self, rec: &Record) -> AppResult<i64> {
        insert_record(&self.pool.conn, &rec.to_raw())
    }

    fn delete(&mut self, id: i64) -> AppResult<bool> {
        delete_record(&self.pool.conn, id)
    }
}
