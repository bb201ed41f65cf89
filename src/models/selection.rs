//! User-chosen filter values.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Text of the "no restriction" entry offered by every choice list.
pub const ALL: &str = "all";

/// One choice-list value: either no restriction or a required value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Choice {
    #[default]
    All,
    Value(String),
}

impl Choice {
    /// `"all"` (any case) or an empty string mean no restriction.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() || t.eq_ignore_ascii_case(ALL) {
            Choice::All
        } else {
            Choice::Value(t.to_string())
        }
    }

    pub fn from_opt(s: Option<&str>) -> Self {
        s.map(Choice::parse).unwrap_or_default()
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Value(v) => Some(v.as_str()),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL),
            Choice::Value(v) => f.write_str(v),
        }
    }
}

/// Full set of filters for one report computation.
///
/// Starts as "everything" and is passed by value into the engine on every
/// recompute; it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub category: Choice,
    pub item_name: Choice,
    pub project_id: Choice,
    pub actor_username: Choice,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, v: &str) -> Self {
        self.category = Choice::parse(v);
        self
    }

    pub fn with_item(mut self, v: &str) -> Self {
        self.item_name = Choice::parse(v);
        self
    }

    pub fn with_project(mut self, v: &str) -> Self {
        self.project_id = Choice::parse(v);
        self
    }

    pub fn with_actor(mut self, v: &str) -> Self {
        self.actor_username = Choice::parse(v);
        self
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }
}
