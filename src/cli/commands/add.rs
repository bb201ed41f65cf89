use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, NewTransaction};
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::record::parse_quantity;
use crate::session::require_identity;
use crate::source::open_source;
use crate::ui::messages::success;
use crate::utils::fmt_quantity;

/// Record a new stock movement for the acting user.
pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    if let Commands::Add {
        op_type,
        item,
        qty,
        category,
        project,
        date,
        note,
    } = cmd
    {
        //
        // 1. Parse quantity
        //
        let quantity = parse_quantity(qty)?;

        //
        // 2. Who is acting
        //
        let pool = open_db(cfg)?;
        let identity = require_identity(&pool.conn, username)?;

        //
        // 3. Execute logic
        //
        let mut source = open_source(cfg)?;
        let tx = NewTransaction {
            operation: op_type.clone(),
            item_name: item.clone(),
            quantity,
            category: category.clone(),
            project_id: project.clone(),
            date: date.clone(),
            note: note.clone(),
        };

        let rec = AddLogic::add(source.as_mut(), &identity, &tx)?;

        let op = rec.operation.map(|o| o.op_as_str()).unwrap_or("--");
        success(format!(
            "Recorded #{}: {} {} x {} [{}] in project {} on {}",
            rec.id,
            op,
            fmt_quantity(rec.quantity, cfg.decimals),
            rec.item_name,
            rec.category,
            rec.project_id,
            rec.date.as_str()
        ));

        //
        // 4. Audit
        //
        ttlog_quiet(
            &pool.conn,
            "add",
            &format!("#{}", rec.id),
            &format!(
                "{} {} {} project={} by {} ({})",
                op,
                rec.quantity,
                rec.item_name,
                rec.project_id,
                identity.username,
                source.describe()
            ),
        );
    }

    Ok(())
}
