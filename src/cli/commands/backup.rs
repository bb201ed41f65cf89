use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let written = BackupLogic::backup(cfg, file, *compress, *force)?;

        let pool = open_db(cfg)?;
        ttlog_quiet(
            &pool.conn,
            "backup",
            &written.display().to_string(),
            if *compress {
                "Compressed backup created"
            } else {
                "Backup copy created"
            },
        );
    }

    Ok(())
}
