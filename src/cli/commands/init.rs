use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ PREPARE CONFIGURATION
    //
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rInventory…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ OPEN DB + MIGRATIONS
    //
    let pool = DbPool::new(&db_path)?;
    let applied = init_db(&pool.conn)?;

    println!("✅ Database initialized at {} ({} migration(s) applied)", &db_path, applied);

    //
    // 3️⃣ INTERNAL LOG (non-blocking)
    //
    ttlog_quiet(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rInventory initialization completed!");
    info("Create the first user (always an administrator) with: rinventory user add <NAME> --project <ID>");
    Ok(())
}
