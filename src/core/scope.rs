//! Mandatory restriction derived from who is asking.

use crate::models::identity::Identity;
use crate::models::record::Record;

/// What an actor is allowed to see, before any user-chosen filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Admin: every record, user and project filters stay editable.
    Unrestricted,
    /// Regular user: pinned to their own username and project.
    Restricted { username: String, project_id: String },
    /// No (valid) identity: nothing is visible.
    NoAccess,
}

impl Scope {
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        match identity {
            None => Scope::NoAccess,
            Some(id) if id.username.trim().is_empty() => Scope::NoAccess,
            Some(id) if id.is_admin => Scope::Unrestricted,
            Some(id) => Scope::Restricted {
                username: id.username.trim().to_string(),
                project_id: id.project_id.trim().to_string(),
            },
        }
    }

    /// True when the actor / project filters are forced and must be shown read-only.
    pub fn is_locked(&self) -> bool {
        !matches!(self, Scope::Unrestricted)
    }

    pub fn admits(&self, rec: &Record) -> bool {
        match self {
            Scope::Unrestricted => true,
            Scope::Restricted {
                username,
                project_id,
            } => rec.actor_username.trim() == username && rec.project_id.trim() == project_id,
            Scope::NoAccess => false,
        }
    }
}
