use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::{Backend, Config};
use crate::core::import::ImportLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::session::require_admin;
use crate::source::{CsvSource, RecordSource, open_source};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::{expand_tilde, same_file};

/// Copy a CSV spreadsheet into the configured backend (admins only).
pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let pool = open_db(cfg)?;
        let admin = require_admin(&pool.conn, username)?;

        let from = CsvSource::new(file);
        if cfg.backend == Backend::Csv && same_file(from.path(), &expand_tilde(&cfg.csv_file)) {
            return Err(AppError::Other(
                "cannot import the active spreadsheet into itself".into(),
            ));
        }

        let mut into = open_source(cfg)?;
        info(format!("Importing {} into {}", from.describe(), into.describe()));

        let summary = ImportLogic::import(&from, into.as_mut())?;

        for r in &summary.rejected {
            warning(format!("row {}: {}", r.row, r.reason));
        }
        success(format!(
            "Imported {} record(s), skipped {}.",
            summary.imported,
            summary.rejected.len()
        ));

        ttlog_quiet(
            &pool.conn,
            "import",
            file,
            &format!(
                "{} imported, {} skipped, by {}",
                summary.imported,
                summary.rejected.len(),
                admin.username
            ),
        );
    }

    Ok(())
}
