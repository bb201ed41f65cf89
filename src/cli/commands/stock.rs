use crate::cli::commands::open_db;
use crate::cli::commands::report::{print_filters, warn_if_no_access};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportEngine;
use crate::core::scope::Scope;
use crate::core::stock::on_hand;
use crate::errors::AppResult;
use crate::session::resolve_identity;
use crate::source::open_source;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RED, RESET};
use crate::utils::formatting::fmt_signed_quantity;
use crate::utils::table::{Column, Table};

/// On-hand quantities per project and item, over the scoped and filtered records.
pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    if let Commands::Stock { filters } = cmd {
        let selection = filters.to_selection()?;

        let pool = open_db(cfg)?;
        let identity = resolve_identity(&pool.conn, username)?;
        warn_if_no_access(username, identity.as_ref());

        let source = open_source(cfg)?;
        let report = ReportEngine::from_source(source.as_ref(), identity.as_ref(), &selection);

        header("Stock on hand");
        print_filters(&selection, &Scope::for_identity(identity.as_ref()));

        let lines = on_hand(&report.records);
        if lines.is_empty() {
            println!("{GREY}No stock movements match the current filters.{RESET}");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("PROJECT"),
            Column::left("ITEM"),
            Column::left("CATEGORY"),
            Column::right("ON HAND"),
            Column::right("MOVES"),
        ]);

        for l in &lines {
            let qty = fmt_signed_quantity(l.on_hand, cfg.decimals);
            let qty = if l.on_hand < 0.0 {
                format!("{RED}{qty}{RESET}")
            } else {
                qty
            };

            table.add_row(vec![
                l.project_id.clone(),
                l.item_name.clone(),
                l.category.clone(),
                qty,
                l.movements.to_string(),
            ]);
        }

        print!("{}", table.render(cfg.separator()));
        println!("\n{} line(s), {}", lines.len(), report.counter_label());
    }

    Ok(())
}
