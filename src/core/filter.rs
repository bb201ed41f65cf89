//! Predicate application: scope merge, exact matches, inclusive date bounds.

use super::scope::Scope;
use crate::models::record::Record;
use crate::models::selection::{Choice, FilterSelection};
use chrono::NaiveDate;

/// Selection after the scope has been laid over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub category: Choice,
    pub item_name: Choice,
    pub project_id: Choice,
    pub actor_username: Choice,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Merge the scope over the user's selection. Forced fields always win,
/// whatever the caller passed for them. `None` means nothing can match.
pub fn resolve(selection: &FilterSelection, scope: &Scope) -> Option<ResolvedSelection> {
    let mut resolved = ResolvedSelection {
        category: selection.category.clone(),
        item_name: selection.item_name.clone(),
        project_id: selection.project_id.clone(),
        actor_username: selection.actor_username.clone(),
        date_from: selection.date_from,
        date_to: selection.date_to,
    };

    match scope {
        Scope::NoAccess => return None,
        Scope::Unrestricted => {}
        Scope::Restricted {
            username,
            project_id,
        } => {
            resolved.actor_username = Choice::Value(username.clone());
            resolved.project_id = Choice::Value(project_id.clone());
        }
    }

    Some(resolved)
}

impl ResolvedSelection {
    pub fn matches(&self, rec: &Record) -> bool {
        field_matches(&self.category, &rec.category)
            && field_matches(&self.item_name, &rec.item_name)
            && field_matches(&self.project_id, &rec.project_id)
            && field_matches(&self.actor_username, &rec.actor_username)
            && self.date_matches(rec)
    }

    fn date_matches(&self, rec: &Record) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }

        // Unparsable dates only drop out of date-bounded queries
        let Some(day) = rec.date.day() else {
            return false;
        };

        self.date_from.is_none_or(|from| day >= from) && self.date_to.is_none_or(|to| day <= to)
    }
}

/// Exact, case-sensitive comparison of trimmed values.
fn field_matches(choice: &Choice, value: &str) -> bool {
    match choice {
        Choice::All => true,
        Choice::Value(required) => value.trim() == required.trim(),
    }
}

/// Keep the records matching `selection` under `scope`, in input order.
pub fn apply<'a>(records: &'a [Record], selection: &FilterSelection, scope: &Scope) -> Vec<&'a Record> {
    match resolve(selection, scope) {
        Some(resolved) => records.iter().filter(|r| resolved.matches(r)).collect(),
        None => Vec::new(),
    }
}
