use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{Report, ReportEngine};
use crate::core::scope::Scope;
use crate::errors::AppResult;
use crate::models::identity::Identity;
use crate::models::selection::{Choice, FilterSelection};
use crate::session::resolve_identity;
use crate::source::open_source;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{GREY, RESET, color_for_balance, colorize_optional, locked};
use crate::utils::formatting::{bold, describe_operation, fmt_quantity, pad_left, pad_right};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, username: Option<&str>) -> AppResult<()> {
    if let Commands::Report { filters, choices } = cmd {
        let selection = filters.to_selection()?;

        let pool = open_db(cfg)?;
        let identity = resolve_identity(&pool.conn, username)?;
        warn_if_no_access(username, identity.as_ref());

        let source = open_source(cfg)?;
        let report = ReportEngine::from_source(source.as_ref(), identity.as_ref(), &selection);

        header(format!("Inventory report ({})", source.describe()));
        print_filters(&selection, &Scope::for_identity(identity.as_ref()));

        if *choices {
            print_choices(&report);
        }

        print_records(&report, cfg);
        print_totals(&report, cfg.decimals);

        println!("\n{}", bold(&report.counter_label()));
    }

    Ok(())
}

/// Explain why a report is going to be empty.
pub(crate) fn warn_if_no_access(username: Option<&str>, identity: Option<&Identity>) {
    match (username, identity) {
        (None, _) => warning("No user selected: nothing is visible (use --user or set current_user)."),
        (Some(name), None) => warning(format!("Unknown user '{}': nothing is visible.", name)),
        _ => {}
    }
}

/// Active filters; forced ones are shown as locked.
pub(crate) fn print_filters(sel: &FilterSelection, scope: &Scope) {
    let (forced_actor, forced_project) = match scope {
        Scope::Restricted {
            username,
            project_id,
        } => (Some(username.as_str()), Some(project_id.as_str())),
        _ => (None, None),
    };

    let show = |label: &str, choice: &Choice, forced: Option<&str>| {
        let value = match forced {
            Some(v) => locked(v),
            None => colorize_optional(&choice.to_string()),
        };
        println!("  {} {}", pad_right(&format!("{label}:"), 10), value);
    };

    show("category", &sel.category, None);
    show("item", &sel.item_name, None);
    show("project", &sel.project_id, forced_project);
    show("actor", &sel.actor_username, forced_actor);

    let bound = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };
    println!(
        "  {} {} → {}\n",
        pad_right("dates:", 10),
        bound(sel.date_from),
        bound(sel.date_to)
    );
}

fn print_choices(report: &Report) {
    println!("Available values:");
    for (label, values) in report.candidates.fields() {
        println!("  {} {}", pad_right(&format!("{label}:"), 10), values.join(", "));
    }
    println!();
}

fn print_records(report: &Report, cfg: &Config) {
    if report.records.is_empty() {
        println!("{GREY}No records match the current filters.{RESET}");
        return;
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("DATE"),
        Column::left("OPERATION"),
        Column::left("ITEM"),
        Column::left("CATEGORY"),
        Column::right("QTY"),
        Column::left("ACTOR"),
        Column::left("PROJECT"),
        Column::left("NOTE"),
    ]);

    for rec in &report.records {
        let (label, color) = describe_operation(rec.operation);
        let date = if rec.date.is_malformed() {
            format!("{GREY}{}{RESET}", rec.date.as_str())
        } else {
            rec.date.as_str().to_string()
        };

        table.add_row(vec![
            rec.id.to_string(),
            date,
            format!("{color}{label}{RESET}"),
            rec.item_name.clone(),
            rec.category.clone(),
            fmt_quantity(rec.quantity, cfg.decimals),
            rec.actor_username.clone(),
            rec.project_id.clone(),
            rec.note.clone(),
        ]);
    }

    print!("{}", table.render(cfg.separator()));
}

fn print_totals(report: &Report, decimals: usize) {
    let agg = &report.aggregates;
    let net = agg.net_balance();

    println!();
    let line = |label: &str, value: String| {
        println!("  {} {}", pad_right(label, 14), pad_left(&value, 12));
    };

    line("Inbound", fmt_quantity(agg.inbound, decimals));
    line("Outbound", fmt_quantity(agg.outbound, decimals));
    line("Adjust +", fmt_quantity(agg.adjust_increase, decimals));
    line("Adjust -", fmt_quantity(agg.adjust_decrease, decimals));
    line(
        "Net balance",
        format!("{}{}{}", color_for_balance(net), fmt_quantity(net, decimals), RESET),
    );
}
