//! Report engine: one pure recomputation per filter change.

use super::aggregate::Aggregates;
use super::candidates::CandidateValues;
use super::filter;
use super::scope::Scope;
use crate::models::identity::Identity;
use crate::models::record::Record;
use crate::models::selection::FilterSelection;
use crate::source::RecordSource;
use crate::ui::messages::warning;

/// Everything a report view needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Matching records, in source order.
    pub records: Vec<Record>,
    pub aggregates: Aggregates,
    pub candidates: CandidateValues,
    /// Records the actor may see at all (the N of "X of N shown").
    pub visible_total: usize,
    /// Actor / project filters are forced by the scope.
    pub scope_locked: bool,
}

impl Report {
    pub fn shown(&self) -> usize {
        self.records.len()
    }

    pub fn counter_label(&self) -> String {
        format!("{} of {} shown", self.shown(), self.visible_total)
    }
}

pub struct ReportEngine;

impl ReportEngine {
    /// Filter `records` for `identity` with the user's `selection`.
    ///
    /// Never fails: no identity, no match and an empty input all give an
    /// empty report with zero aggregates.
    pub fn compute(
        records: &[Record],
        identity: Option<&Identity>,
        selection: &FilterSelection,
    ) -> Report {
        let scope = Scope::for_identity(identity);

        let matched: Vec<Record> = filter::apply(records, selection, &scope)
            .into_iter()
            .cloned()
            .collect();

        Report {
            aggregates: Aggregates::from_records(&matched),
            candidates: CandidateValues::collect(records, &scope),
            visible_total: records.iter().filter(|r| scope.admits(r)).count(),
            scope_locked: scope.is_locked(),
            records: matched,
        }
    }

    /// Same as [`compute`](Self::compute), reading from a source first.
    /// A source that cannot be read counts as holding zero records.
    pub fn from_source(
        source: &dyn RecordSource,
        identity: Option<&Identity>,
        selection: &FilterSelection,
    ) -> Report {
        let records = fetch_or_empty(source);
        Self::compute(&records, identity, selection)
    }
}

/// Records from `source`, or none (with a warning) if it is unavailable.
pub fn fetch_or_empty(source: &dyn RecordSource) -> Vec<Record> {
    match source.load() {
        Ok(ingested) => {
            if !ingested.rejected.is_empty() {
                warning(format!(
                    "{}: skipped {} invalid row(s)",
                    source.describe(),
                    ingested.rejected.len()
                ));
            }
            ingested.records
        }
        Err(e) => {
            warning(format!("{e} (showing 0 records)"));
            Vec::new()
        }
    }
}
