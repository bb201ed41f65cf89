use crate::config::{Config, migrate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    /// Report keys missing from the file. Returns how many are missing.
    pub fn check(path: &Path) -> AppResult<usize> {
        if !path.exists() {
            warning(format!("No configuration file at {}", path.display()));
            return Ok(0);
        }

        let missing = migrate::missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing keys: {}", missing.join(", ")));
            info("Run `config --migrate` to add them with default values.");
        }
        Ok(missing.len())
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!("No configuration file at {}", path.display()));
            return Ok(());
        }

        let added = migrate::fill_missing_keys(path)?;
        if added.is_empty() {
            info("Configuration already up to date.");
        } else {
            success(format!("Added keys: {}", added.join(", ")));
        }
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} not found, run `init` first",
                path.display()
            )));
        }

        // Default editor basato sulla piattaforma
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            }
            _ => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));
                let status = Command::new(&default_editor)
                    .arg(path)
                    .status()
                    .map_err(|e| AppError::Config(e.to_string()))?;
                if !status.success() {
                    return Err(AppError::Config(format!(
                        "editor '{}' exited with {}",
                        default_editor, status
                    )));
                }
            }
        }

        // Reject edits that no longer parse
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str::<Config>(&content)
            .map_err(|e| AppError::Config(format!("edited file is invalid: {e}")))?;

        Ok(())
    }
}
