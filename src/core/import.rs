use crate::errors::AppResult;
use crate::source::{Rejected, RecordSource};

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub rejected: Vec<Rejected>,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Copy every valid record of `from` into `into`. Records get new ids in
    /// the target; invalid rows are reported and skipped.
    pub fn import(from: &dyn RecordSource, into: &mut dyn RecordSource) -> AppResult<ImportSummary> {
        let ingested = from.load()?;
        let mut summary = ImportSummary {
            imported: 0,
            rejected: ingested.rejected,
        };

        for rec in &ingested.records {
            into.append(rec)?;
            summary.imported += 1;
        }

        Ok(summary)
    }
}
