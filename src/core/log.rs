use crate::db::queries::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;
use crate::utils::formatting::strip_ansi;
use rusqlite::Connection;

const OP_TARGET_MAX: usize = 60;

/// ANSI color for each logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "import" => Colour::Cyan,
        "export" => Colour::Blue,
        "user_add" | "user_del" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries: Vec<_> = load_log(conn)?
            .into_iter()
            .map(|(id, raw_date, operation, target, message)| {
                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);
                (id, date, operation, target, message)
            })
            .collect();

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| op_target(op, target).len())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let color = color_for_operation(&operation);

            let visible = op_target(&operation, &target);
            let visible = if visible.chars().count() > OP_TARGET_MAX {
                let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                visible
            };

            // only the operation word is colored
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            // padding computed on the text WITHOUT ANSI codes
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

fn op_target(operation: &str, target: &str) -> String {
    if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    }
}
