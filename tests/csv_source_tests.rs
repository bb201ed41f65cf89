mod common;
use common::{admin, user};
use rinventory::core::report::ReportEngine;
use rinventory::errors::AppError;
use rinventory::models::record::Record;
use rinventory::models::selection::FilterSelection;
use rinventory::source::{CsvSource, RecordSource};
use std::env;
use std::fs;
use std::path::PathBuf;

fn temp_csv(name: &str, content: Option<&str>) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rinventory.csv", name));
    fs::remove_file(&path).ok();
    if let Some(c) = content {
        fs::write(&path, c).expect("write csv fixture");
    }
    path.to_string_lossy().to_string()
}

const SHEET: &str = "\
id,date,operation,item_name,category,quantity,actor_username,project_id,note
1,2024-01-15,in,Drill,Tools,3,Sara,102,
2,2024-01-16,out,Drill,Tools,1,Sara,102,used on site
3,someday,in,Hammer,Tools,2,Ali,103,
4,2024-01-18,in,,Tools,2,Ali,103,no item
5,2024-01-19,in,Saw,Tools,-2,Ali,103,
";

#[test]
fn test_load_spreadsheet() {
    let path = temp_csv("csv_load", Some(SHEET));
    let source = CsvSource::new(&path);

    let out = source.load().expect("load csv");

    let ids: Vec<i64> = out.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(out.records[1].note, "used on site");
    assert!(out.records[2].date.is_malformed());

    let bad_rows: Vec<usize> = out.rejected.iter().map(|r| r.row).collect();
    assert_eq!(bad_rows, vec![4, 5]);
}

#[test]
fn test_columns_in_any_order_without_id() {
    let sheet = "\
project_id,actor_username,item_name,quantity,operation,date
102,Sara,Drill,3,inbound,2024-01-15
103,Ali,Hammer,1,inbound,2024-01-16
";
    let path = temp_csv("csv_any_order", Some(sheet));
    let out = CsvSource::new(&path).load().expect("load csv");

    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].id, 1);
    assert_eq!(out.records[1].id, 2);
    assert_eq!(out.records[1].item_name, "Hammer");
    assert_eq!(out.records[0].category, "unspecified");
}

#[test]
fn test_missing_file_is_unavailable() {
    let path = temp_csv("csv_missing", None);
    let source = CsvSource::new(&path);

    assert!(matches!(source.load(), Err(AppError::SourceUnavailable(_))));

    // the report degrades to an empty result
    let report = ReportEngine::from_source(&source, Some(&admin()), &FilterSelection::all());
    assert!(report.records.is_empty());
    assert_eq!(report.counter_label(), "0 of 0 shown");
}

#[test]
fn test_append_then_delete() {
    let path = temp_csv("csv_append_delete", None);
    let mut source = CsvSource::new(&path);

    let seed = |item: &str| {
        let raw = common::raw(0, "Sara", "102", "Tools", item, "2024-02-01");
        Record::from_raw(&raw, 0).expect("valid row")
    };

    assert_eq!(source.append(&seed("Drill")).expect("append"), 1);
    assert_eq!(source.append(&seed("Saw")).expect("append"), 2);
    assert_eq!(source.append(&seed("Level")).expect("append"), 3);

    let content = fs::read_to_string(&path).expect("read csv");
    assert!(content.starts_with("id,date,operation,item_name"));
    assert_eq!(content.matches("id,date").count(), 1);

    assert!(source.delete(2).expect("delete"));
    assert!(!source.delete(2).expect("delete twice"));

    let items: Vec<String> = source
        .get_records()
        .expect("reload")
        .into_iter()
        .map(|r| r.item_name)
        .collect();
    assert_eq!(items, vec!["Drill", "Level"]);

    // ids keep growing after a delete
    assert_eq!(source.append(&seed("Tape")).expect("append"), 4);
}

fn drill(qty: &str) -> Record {
    let mut raw = common::raw(0, "Sara", "102", "Tools", "Drill", "2024-02-01");
    raw.quantity = qty.to_string();
    Record::from_raw(&raw, 0).expect("valid row")
}

#[test]
fn test_append_to_reordered_sheet_rewrites_it() {
    let sheet = "\
project_id,actor_username,item_name,quantity,operation,date
102,Sara,Hammer,3,inbound,2024-01-15
";
    let path = temp_csv("csv_append_reordered", Some(sheet));
    let mut source = CsvSource::new(&path);

    assert_eq!(source.append(&drill("5")).expect("append"), 2);

    let out = source.load().expect("reload");
    assert!(out.rejected.is_empty(), "{:?}", out.rejected);

    let rows: Vec<(i64, String, f64)> = out
        .records
        .iter()
        .map(|r| (r.id, r.item_name.clone(), r.quantity))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "Hammer".to_string(), 3.0), (2, "Drill".to_string(), 5.0)]
    );

    let content = fs::read_to_string(&path).expect("read csv");
    assert!(content.starts_with("id,date,operation,item_name"));

    // canonical now: the next row is appended in place
    assert_eq!(source.append(&drill("1")).expect("append"), 3);
    assert_eq!(source.get_records().expect("reload").len(), 3);
}

#[test]
fn test_append_without_trailing_newline() {
    let sheet = "\
id,date,operation,item_name,category,quantity,actor_username,project_id,note
1,2024-01-15,in,Hammer,Tools,3,Sara,102,";
    let path = temp_csv("csv_append_no_newline", Some(sheet));
    let mut source = CsvSource::new(&path);

    assert_eq!(source.append(&drill("2")).expect("append"), 2);

    let out = source.load().expect("reload");
    assert!(out.rejected.is_empty(), "{:?}", out.rejected);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].note, "");
    assert_eq!(out.records[1].item_name, "Drill");
    assert_eq!(out.records[1].quantity, 2.0);
}

#[test]
fn test_append_refuses_to_rewrite_unreadable_rows() {
    let sheet = "\
item_name,id,quantity,date
Hammer,1,3,2024-01-15
Saw,abc,1,2024-01-16
";
    let path = temp_csv("csv_append_unreadable", Some(sheet));
    let mut source = CsvSource::new(&path);

    assert_eq!(source.load().expect("load").rejected.len(), 1);
    assert!(matches!(source.append(&drill("1")), Err(AppError::InvalidRecord(_))));
    assert_eq!(fs::read_to_string(&path).expect("read csv"), sheet);
}

#[test]
fn test_same_report_from_csv_and_sqlite() {
    let path = temp_csv("csv_vs_sqlite", Some(SHEET));
    let csv = CsvSource::new(&path);
    let mut sqlite = common::memory_source();

    for rec in csv.get_records().expect("load csv") {
        sqlite.append(&rec).expect("copy into sqlite");
    }

    let who = user("Sara", "102");
    let sel = FilterSelection::all().with_item("Drill");

    let a = ReportEngine::from_source(&csv, Some(&who), &sel);
    let b = ReportEngine::from_source(&sqlite, Some(&who), &sel);

    assert_eq!(a.aggregates, b.aggregates);
    assert_eq!(a.candidates, b.candidates);
    assert_eq!(a.counter_label(), b.counter_label());
    assert_eq!(a.aggregates.net_balance(), 2.0);
}
