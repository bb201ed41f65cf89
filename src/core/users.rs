use crate::db::queries::{count_admins, delete_user, find_user, insert_user, load_users};
use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use crate::models::user::User;
use rusqlite::Connection;

pub struct UserLogic;

impl UserLogic {
    /// Create a user. While the table is empty anyone may create the first
    /// account, and that account is always an administrator.
    pub fn add(
        conn: &Connection,
        actor: Option<&Identity>,
        username: &str,
        project_id: &str,
        is_admin: bool,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Other("username cannot be empty".into()));
        }

        let bootstrap = load_users(conn)?.is_empty();
        if !bootstrap {
            Self::ensure_admin(actor)?;
        }

        insert_user(conn, username, project_id, is_admin || bootstrap)?;
        find_user(conn, username)?.ok_or_else(|| AppError::UnknownUser(username.to_string()))
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<User>> {
        load_users(conn)
    }

    /// Remove a user. The last administrator cannot be removed.
    pub fn delete(conn: &Connection, actor: Option<&Identity>, username: &str) -> AppResult<User> {
        Self::ensure_admin(actor)?;

        let user =
            find_user(conn, username)?.ok_or_else(|| AppError::UnknownUser(username.to_string()))?;

        if user.is_admin && count_admins(conn)? <= 1 {
            return Err(AppError::PermissionDenied(
                "cannot remove the last administrator".into(),
            ));
        }

        delete_user(conn, &user.username)?;
        Ok(user)
    }

    fn ensure_admin(actor: Option<&Identity>) -> AppResult<()> {
        match actor {
            Some(id) if id.is_admin => Ok(()),
            Some(id) => Err(AppError::PermissionDenied(format!(
                "'{}' is not an administrator",
                id.username
            ))),
            None => Err(AppError::NoSession),
        }
    }
}
