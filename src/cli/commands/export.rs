use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::session::resolve_identity;
use crate::source::open_source;

pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filters,
        force,
    } = cmd
    {
        let selection = filters.to_selection()?;

        let pool = open_db(cfg)?;
        let identity = resolve_identity(&pool.conn, username)?;
        let source = open_source(cfg)?;

        let exported = ExportLogic::export(
            source.as_ref(),
            identity.as_ref(),
            &selection,
            *format,
            file,
            *force,
            cfg.decimals,
        )?;

        ttlog_quiet(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("{} record(s) to {}", exported, file),
        );
    }
    Ok(())
}
