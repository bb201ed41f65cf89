use serde::Serialize;

/// Acting user for one command invocation.
///
/// Built by the session layer and passed explicitly to whatever needs it;
/// never stored globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
    pub project_id: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn new(username: &str, project_id: &str, is_admin: bool) -> Self {
        Self {
            username: username.trim().to_string(),
            project_id: project_id.trim().to_string(),
            is_admin,
        }
    }
}
