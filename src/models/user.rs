//! Row model for the `users` table.

use super::identity::Identity;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub project_id: String,
    pub is_admin: bool,
    pub created_at: String, // ⇔ users.created_at (TEXT, ISO8601)
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.username, &self.project_id, self.is_admin)
    }

    pub fn role(&self) -> &'static str {
        if self.is_admin { "admin" } else { "user" }
    }
}
