use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::models::selection::{Choice, FilterSelection};
use crate::utils::date::parse_optional_date;
use crate::utils::range::parse_range;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rInventory
/// CLI application to record and report stock movements with SQLite
#[derive(Parser)]
#[command(
    name = "rinventory",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple inventory CLI: record stock movements per project and report them with per-user scoping",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user (overrides `current_user` from the configuration)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by `report`, `stock` and `export`.
/// Every field defaults to "all" (or an open date bound).
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Category to show (default: all)")]
    pub category: Option<String>,

    #[arg(long, help = "Item name to show (default: all)")]
    pub item: Option<String>,

    #[arg(long, help = "Project id to show (default: all)")]
    pub project: Option<String>,

    #[arg(long, help = "Username of the actor (default: all)")]
    pub actor: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "First day included")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Last day included")]
    pub to: Option<String>,

    #[arg(
        long,
        short,
        value_name = "RANGE",
        conflicts_with_all = ["from", "to"],
        help = "Year, month, day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, A:B)"
    )]
    pub period: Option<String>,
}

impl FilterArgs {
    /// Turn the flags into a selection. Bad dates are rejected here, before
    /// any record is read.
    pub fn to_selection(&self) -> AppResult<FilterSelection> {
        let (from, to) = match &self.period {
            Some(p) => {
                let (f, t) = parse_range(p)?;
                (Some(f), Some(t))
            }
            None => (
                parse_optional_date(self.from.as_ref())?,
                parse_optional_date(self.to.as_ref())?,
            ),
        };

        if let (Some(f), Some(t)) = (from, to)
            && f > t
        {
            return Err(AppError::InvalidDate(format!("--from {f} is after --to {t}")));
        }

        Ok(FilterSelection {
            category: Choice::from_opt(self.category.as_deref()),
            item_name: Choice::from_opt(self.item.as_deref()),
            project_id: Choice::from_opt(self.project.as_deref()),
            actor_username: Choice::from_opt(self.actor.as_deref()),
            date_from: from,
            date_to: to,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage users (the first user created is always an administrator)
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Record a stock movement
    Add {
        /// in, out, adj+ or adj-
        #[arg(long = "type", value_name = "OPERATION")]
        op_type: String,

        #[arg(long)]
        item: String,

        #[arg(long = "qty", help = "Quantity (positive; a decimal comma is accepted)")]
        qty: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, help = "Project id (default: the project of the acting user)")]
        project: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Date of the movement (default: today)")]
        date: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a record by id
    Del {
        #[arg(long)]
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show the filtered records with totals
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "List the values each filter accepts")]
        choices: bool,
    },

    /// Show stock on hand per project and item
    Stock {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the filtered records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import records from a CSV spreadsheet into the configured backend
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        username: String,

        #[arg(long)]
        project: String,

        #[arg(long)]
        admin: bool,
    },

    /// List users
    List,

    /// Delete a user
    Del { username: String },
}
