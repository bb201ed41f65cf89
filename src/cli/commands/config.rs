use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        // Configuration file path
        let path = Config::config_file();

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if *check {
            ConfigLogic::check(&path)?;
        }

        if *migrate {
            ConfigLogic::migrate(&path)?;
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
