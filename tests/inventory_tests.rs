mod common;
use common::{admin, memory_source, raw, record_as, records, tx, user};
use rinventory::core::add::{AddLogic, NewTransaction};
use rinventory::core::del::DeleteLogic;
use rinventory::core::import::ImportLogic;
use rinventory::core::stock::{on_hand, on_hand_for};
use rinventory::core::users::UserLogic;
use rinventory::db::initialize::init_db;
use rinventory::db::pool::DbPool;
use rinventory::errors::AppError;
use rinventory::models::operation_type::OperationType;
use rinventory::source::{CsvSource, RecordSource};
use std::env;
use std::fs;

// ---------------------------
// stock
// ---------------------------

#[test]
fn test_on_hand_per_project_and_item() {
    let mut rows = vec![
        raw(1, "Sara", "102", "Tools", "Drill", "2024-01-01"),
        raw(2, "Sara", "102", "Tools", "Drill", "2024-01-02"),
        raw(3, "Ali", "103", "Tools", "Drill", "2024-01-03"),
        raw(4, "Sara", "102", "Paint", "White", "2024-01-04"),
    ];
    rows[0].quantity = "5".into();
    rows[1].operation = "out".into();
    rows[1].quantity = "2".into();
    rows[2].quantity = "4".into();
    rows[3].operation = "adj-".into();
    rows[3].quantity = "1".into();

    let recs = records(&rows);
    let lines = on_hand(&recs);

    let summary: Vec<(&str, &str, f64, usize)> = lines
        .iter()
        .map(|l| (l.project_id.as_str(), l.item_name.as_str(), l.on_hand, l.movements))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("102", "Drill", 3.0, 2),
            ("102", "White", -1.0, 1),
            ("103", "Drill", 4.0, 1),
        ]
    );
    assert_eq!(on_hand_for(&recs, "102", "Drill"), 3.0);
    assert_eq!(on_hand_for(&recs, "104", "Drill"), 0.0);
}

// ---------------------------
// add
// ---------------------------

#[test]
fn test_add_records_as_the_acting_user() {
    let mut source = memory_source();
    let sara = user("Sara", "102");

    let rec = record_as(&mut source, &sara, &tx("in", "Drill", 3.0));

    assert_eq!(rec.id, 1);
    assert_eq!(rec.actor_username, "Sara");
    assert_eq!(rec.project_id, "102");
    assert_eq!(rec.operation, Some(OperationType::Inbound));
    assert_eq!(source.get_records().expect("load").len(), 1);
}

#[test]
fn test_non_admin_cannot_record_into_another_project() {
    let mut source = memory_source();
    let sara = user("Sara", "102");

    let t = NewTransaction {
        project_id: Some("103".into()),
        ..tx("in", "Drill", 1.0)
    };

    let err = AddLogic::add(&mut source, &sara, &t).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
    assert!(source.get_records().expect("load").is_empty());
}

#[test]
fn test_admin_records_into_any_project() {
    let mut source = memory_source();

    let t = NewTransaction {
        project_id: Some("103".into()),
        ..tx("in", "Drill", 1.0)
    };
    let rec = record_as(&mut source, &admin(), &t);

    assert_eq!(rec.project_id, "103");
    assert_eq!(rec.actor_username, "root");
}

#[test]
fn test_withdrawal_cannot_overdraw_stock() {
    let mut source = memory_source();
    let sara = user("Sara", "102");

    record_as(&mut source, &sara, &tx("in", "Drill", 3.0));
    record_as(&mut source, &sara, &tx("out", "Drill", 2.0));

    let err = AddLogic::add(&mut source, &sara, &tx("adj-", "Drill", 1.5)).unwrap_err();
    match err {
        AppError::InsufficientStock {
            on_hand, requested, ..
        } => {
            assert_eq!(on_hand, 1.0);
            assert_eq!(requested, 1.5);
        }
        other => panic!("unexpected error: {other}"),
    }

    // exactly what is left is fine
    record_as(&mut source, &sara, &tx("out", "Drill", 1.0));
}

#[test]
fn test_stock_is_counted_per_project() {
    let mut source = memory_source();

    record_as(&mut source, &user("Ali", "103"), &tx("in", "Drill", 10.0));

    let err = AddLogic::add(&mut source, &user("Sara", "102"), &tx("out", "Drill", 1.0)).unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
}

#[test]
fn test_add_rejects_bad_input() {
    let mut source = memory_source();
    let sara = user("Sara", "102");

    let bad_op = tx("borrow", "Drill", 1.0);
    assert!(matches!(
        AddLogic::add(&mut source, &sara, &bad_op),
        Err(AppError::InvalidOperation(_))
    ));

    let zero = tx("in", "Drill", 0.0);
    assert!(matches!(
        AddLogic::add(&mut source, &sara, &zero),
        Err(AppError::InvalidQuantity(_))
    ));

    let bad_date = NewTransaction {
        date: Some("2024-02-30".into()),
        ..tx("in", "Drill", 1.0)
    };
    assert!(matches!(
        AddLogic::add(&mut source, &sara, &bad_date),
        Err(AppError::InvalidDate(_))
    ));

    let no_item = tx("in", "  ", 1.0);
    assert!(matches!(
        AddLogic::add(&mut source, &sara, &no_item),
        Err(AppError::InvalidRecord(_))
    ));
}

// ---------------------------
// del
// ---------------------------

#[test]
fn test_delete_own_record() {
    let mut source = memory_source();
    let sara = user("Sara", "102");
    let rec = record_as(&mut source, &sara, &tx("in", "Drill", 1.0));

    let removed = DeleteLogic::apply(&mut source, &sara, rec.id).expect("delete");
    assert_eq!(removed.item_name, "Drill");
    assert!(source.get_records().expect("load").is_empty());

    assert!(matches!(
        DeleteLogic::apply(&mut source, &sara, rec.id),
        Err(AppError::RecordNotFound(_))
    ));
}

#[test]
fn test_non_admin_cannot_delete_others_records() {
    let mut source = memory_source();
    let ali_rec = record_as(&mut source, &user("Ali", "102"), &tx("in", "Drill", 1.0));

    let err = DeleteLogic::apply(&mut source, &user("Sara", "102"), ali_rec.id).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    DeleteLogic::apply(&mut source, &admin(), ali_rec.id).expect("admin may delete");
}

// ---------------------------
// users
// ---------------------------

fn user_db() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

#[test]
fn test_fresh_schema_has_note_column() {
    let pool = DbPool::in_memory().expect("open in-memory db");
    assert_eq!(init_db(&pool.conn).expect("init db"), 2);
    assert_eq!(init_db(&pool.conn).expect("init db again"), 0);

    let mut stmt = pool.conn.prepare("PRAGMA table_info('records')").expect("pragma");
    let cols: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .expect("columns")
        .collect::<Result<_, _>>()
        .expect("column names");
    assert!(cols.iter().any(|c| c == "note"), "{cols:?}");
}

#[test]
fn test_first_user_is_admin() {
    let pool = user_db();

    let first = UserLogic::add(&pool.conn, None, "boss", "P0", false).expect("bootstrap user");
    assert!(first.is_admin);

    // afterwards an administrator is required
    assert!(matches!(
        UserLogic::add(&pool.conn, None, "eve", "P1", false),
        Err(AppError::NoSession)
    ));

    let boss = first.identity();
    let sara = UserLogic::add(&pool.conn, Some(&boss), "sara", "102", false).expect("add user");
    assert!(!sara.is_admin);

    assert!(matches!(
        UserLogic::add(&pool.conn, Some(&sara.identity()), "eve", "102", false),
        Err(AppError::PermissionDenied(_))
    ));
    assert!(matches!(
        UserLogic::add(&pool.conn, Some(&boss), "sara", "103", false),
        Err(AppError::DuplicateUser(_))
    ));

    let names: Vec<String> = UserLogic::list(&pool.conn)
        .expect("list")
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["boss", "sara"]);
}

#[test]
fn test_last_admin_cannot_be_removed() {
    let pool = user_db();
    let boss = UserLogic::add(&pool.conn, None, "boss", "P0", false)
        .expect("bootstrap user")
        .identity();
    UserLogic::add(&pool.conn, Some(&boss), "sara", "102", false).expect("add user");

    assert!(matches!(
        UserLogic::delete(&pool.conn, Some(&boss), "boss"),
        Err(AppError::PermissionDenied(_))
    ));

    UserLogic::delete(&pool.conn, Some(&boss), "sara").expect("delete user");
    assert!(matches!(
        UserLogic::delete(&pool.conn, Some(&boss), "sara"),
        Err(AppError::UnknownUser(_))
    ));
}

// ---------------------------
// import
// ---------------------------

#[test]
fn test_import_skips_invalid_rows() {
    let mut path = env::temp_dir();
    path.push("import_skips_invalid_rinventory.csv");
    fs::write(
        &path,
        "date,operation,item_name,quantity,actor_username,project_id\n\
         2024-01-15,in,Drill,3,Sara,102\n\
         2024-01-16,steal,Drill,1,Sara,102\n\
         2024-01-17,out,Drill,1,Sara,102\n",
    )
    .expect("write csv fixture");

    let from = CsvSource::new(&path.to_string_lossy());
    let mut into = memory_source();

    let summary = ImportLogic::import(&from, &mut into).expect("import");

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].row, 2);

    let loaded = into.get_records().expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].operation, Some(OperationType::Outbound));
}
