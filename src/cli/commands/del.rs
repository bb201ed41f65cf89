use crate::cli::commands::{ask_confirmation, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::session::require_identity;
use crate::source::open_source;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let pool = open_db(cfg)?;
        let identity = require_identity(&pool.conn, username)?;

        //
        // Confirmation prompt
        //
        if !*yes
            && !ask_confirmation(&format!(
                "Delete record #{}? This action is irreversible.",
                id
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let mut source = open_source(cfg)?;
        let removed = DeleteLogic::apply(source.as_mut(), &identity, *id)?;

        success(format!(
            "Record #{} ({} of {}) has been deleted.",
            removed.id, removed.quantity, removed.item_name
        ));

        ttlog_quiet(
            &pool.conn,
            "del",
            &format!("#{}", removed.id),
            &format!(
                "{} project={} deleted by {}",
                removed.item_name, removed.project_id, identity.username
            ),
        );
    }

    Ok(())
}
