use crate::cli::commands::{ask_confirmation, open_db};
use crate::cli::parser::{Commands, UserCommands};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::session::resolve_identity;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let pool = open_db(cfg)?;
    let actor = resolve_identity(&pool.conn, username)?;

    match action {
        UserCommands::Add {
            username: name,
            project,
            admin,
        } => {
            let user = UserLogic::add(&pool.conn, actor.as_ref(), name, project, *admin)?;

            success(format!(
                "User '{}' created ({}, project {})",
                user.username,
                user.role(),
                user.project_id
            ));
            ttlog_quiet(
                &pool.conn,
                "user_add",
                &user.username,
                &format!("role={} project={}", user.role(), user.project_id),
            );

            if actor.is_none() && cfg.current_user.is_none() {
                info(format!(
                    "Act as this user with --user {} or set current_user in the configuration.",
                    user.username
                ));
            }
        }

        UserCommands::List => {
            let users = UserLogic::list(&pool.conn)?;
            if users.is_empty() {
                info("No users yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("USERNAME"),
                Column::left("PROJECT"),
                Column::left("ROLE"),
                Column::left("CREATED"),
            ]);
            for u in &users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.project_id.clone(),
                    u.role().to_string(),
                    u.created_at.clone(),
                ]);
            }
            print!("{}", table.render(cfg.separator()));
        }

        UserCommands::Del { username: name } => {
            if !ask_confirmation(&format!("Delete user '{}'?", name)) {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = UserLogic::delete(&pool.conn, actor.as_ref(), name)?;
            success(format!("User '{}' deleted.", removed.username));
            ttlog_quiet(&pool.conn, "user_del", &removed.username, "User deleted");
        }
    }

    Ok(())
}
