//! rInventory library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod session;
pub mod source;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::path::resolve_in;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let user = session::requested_username(cli.user.as_deref(), cfg);

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg, user),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg, user),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg, user),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg, user),
        Commands::Stock { .. } => cli::commands::stock::handle(&cli.command, cfg, user),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, user),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg, user),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point called by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load the configuration once
    let mut cfg = Config::load()?;

    // 3️⃣ apply the --db override, if any
    if let Some(custom_db) = &cli.db {
        cfg.database = resolve_in(&Config::config_dir(), custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ hand over to the dispatcher
    dispatch(&cli, &cfg)
}
