//! Values offered by each choice list.

use super::scope::Scope;
use crate::models::record::Record;
use crate::models::selection::ALL;
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct values per filterable field, each list starting with `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateValues {
    pub category: Vec<String>,
    pub item_name: Vec<String>,
    pub project_id: Vec<String>,
    pub actor_username: Vec<String>,
}

impl CandidateValues {
    /// Lists built from every record the scope admits. The user's other
    /// selections are deliberately not applied: each list always offers the
    /// whole scoped universe.
    pub fn collect(records: &[Record], scope: &Scope) -> Self {
        let mut category = BTreeSet::new();
        let mut item_name = BTreeSet::new();
        let mut project_id = BTreeSet::new();
        let mut actor_username = BTreeSet::new();

        for rec in records.iter().filter(|r| scope.admits(r)) {
            insert_trimmed(&mut category, &rec.category);
            insert_trimmed(&mut item_name, &rec.item_name);
            insert_trimmed(&mut project_id, &rec.project_id);
            insert_trimmed(&mut actor_username, &rec.actor_username);
        }

        Self {
            category: with_all(category),
            item_name: with_all(item_name),
            project_id: with_all(project_id),
            actor_username: with_all(actor_username),
        }
    }

    /// (field label, values) pairs, in display order.
    pub fn fields(&self) -> [(&'static str, &[String]); 4] {
        [
            ("category", self.category.as_slice()),
            ("item", self.item_name.as_slice()),
            ("project", self.project_id.as_slice()),
            ("actor", self.actor_username.as_slice()),
        ]
    }
}

fn insert_trimmed<'a>(set: &mut BTreeSet<&'a str>, value: &'a str) {
    let v = value.trim();
    // a literal "all" would be read back as the sentinel
    if !v.is_empty() && !v.eq_ignore_ascii_case(ALL) {
        set.insert(v);
    }
}

// BTreeSet<&str> iterates in byte order, which is the locale-neutral sort we want
fn with_all(values: BTreeSet<&str>) -> Vec<String> {
    std::iter::once(ALL)
        .chain(values)
        .map(str::to_string)
        .collect()
}
