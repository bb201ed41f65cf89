//! Identity provider: maps a username to the acting [`Identity`].
//!
//! There is no process-wide session. Each command resolves the identity once
//! and passes it down explicitly.

use crate::config::Config;
use crate::db::queries::find_user;
use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use rusqlite::Connection;

/// `--user` wins over `current_user` from the configuration.
pub fn requested_username<'a>(cli_user: Option<&'a str>, cfg: &'a Config) -> Option<&'a str> {
    cli_user
        .or(cfg.current_user.as_deref())
        .map(str::trim)
        .filter(|u| !u.is_empty())
}

/// Look the user up. Unknown or missing users give `None`, which the report
/// engine treats as "no access".
pub fn resolve_identity(conn: &Connection, username: Option<&str>) -> AppResult<Option<Identity>> {
    let Some(name) = username else {
        return Ok(None);
    };
    Ok(find_user(conn, name)?.map(|u| u.identity()))
}

/// For commands that change data: an identity is mandatory.
pub fn require_identity(conn: &Connection, username: Option<&str>) -> AppResult<Identity> {
    let name = username.ok_or(AppError::NoSession)?;
    resolve_identity(conn, Some(name))?.ok_or_else(|| AppError::UnknownUser(name.to_string()))
}

/// For admin-only commands.
pub fn require_admin(conn: &Connection, username: Option<&str>) -> AppResult<Identity> {
    let identity = require_identity(conn, username)?;
    if !identity.is_admin {
        return Err(AppError::PermissionDenied(format!(
            "'{}' is not an administrator",
            identity.username
        )));
    }
    Ok(identity)
}
