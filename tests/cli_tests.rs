use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::TestEnv;

#[test]
fn test_report_is_scoped_to_the_user() {
    let env = TestEnv::new("cli_report_scoped");
    env.init_with_data();

    env.as_user("alice")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("screws"))
        .stdout(contains("paint").not())
        .stdout(contains("2 of 2 shown"));

    env.as_user("admin")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("paint"))
        .stdout(contains("4 of 4 shown"));
}

#[test]
fn test_report_scope_cannot_be_widened_from_flags() {
    let env = TestEnv::new("cli_report_widen");
    env.init_with_data();

    env.as_user("alice")
        .args(["report", "--actor", "bob", "--project", "P2"])
        .assert()
        .success()
        .stdout(contains("paint").not())
        .stdout(contains("🔒"))
        .stdout(contains("2 of 2 shown"));
}

#[test]
fn test_report_without_matches_shows_counter() {
    let env = TestEnv::new("cli_report_no_match");
    env.init_with_data();

    env.as_user("alice")
        .args(["report", "--item", "paint"])
        .assert()
        .success()
        .stdout(contains("No records match"))
        .stdout(contains("0 of 2 shown"));
}

#[test]
fn test_report_without_user_shows_nothing() {
    let env = TestEnv::new("cli_report_no_user");
    env.init_with_data();

    env.cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(contains("No user selected"))
        .stdout(contains("0 of 0 shown"));

    env.as_user("ghost")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("Unknown user 'ghost'"))
        .stdout(contains("0 of 0 shown"));
}

#[test]
fn test_report_date_filters() {
    let env = TestEnv::new("cli_report_dates");
    env.init_with_data();

    env.as_user("admin")
        .args(["report", "--from", "2025-01-01", "--to", "2025-01-31"])
        .assert()
        .success()
        .stdout(contains("2 of 4 shown"));

    env.as_user("admin")
        .args(["report", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("1 of 4 shown"));

    env.as_user("admin")
        .args(["report", "--from", "2025-13-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_report_choices() {
    let env = TestEnv::new("cli_report_choices");
    env.init_with_data();

    env.as_user("admin")
        .args(["report", "--choices", "--item", "paint"])
        .assert()
        .success()
        .stdout(contains("all, hardware, supplies"))
        .stdout(contains("all, admin, alice, bob"))
        .stdout(contains("1 of 4 shown"));

    env.as_user("bob")
        .args(["report", "--choices"])
        .assert()
        .success()
        .stdout(contains("all, supplies"))
        .stdout(contains("hardware").not());
}

#[test]
fn test_stock_on_hand() {
    let env = TestEnv::new("cli_stock");
    env.init_with_data();

    env.as_user("admin")
        .arg("stock")
        .assert()
        .success()
        .stdout(contains("+13"))
        .stdout(contains("+5"))
        .stdout(contains("2 line(s)"));

    env.as_user("alice")
        .arg("stock")
        .assert()
        .success()
        .stdout(contains("+6"))
        .stdout(contains("paint").not());
}

#[test]
fn test_add_refuses_overdraw() {
    let env = TestEnv::new("cli_add_overdraw");
    env.init_with_data();

    env.as_user("bob")
        .args(["add", "--type", "out", "--item", "paint", "--qty", "6"])
        .assert()
        .failure()
        .stderr(contains("Insufficient stock"));

    env.as_user("bob")
        .args(["add", "--type", "out", "--item", "paint", "--qty", "5", "--date", "2025-04-01"])
        .assert()
        .success()
        .stdout(contains("Recorded #5"));
}

#[test]
fn test_add_requires_a_user_and_own_project() {
    let env = TestEnv::new("cli_add_permissions");
    env.init_with_users();

    env.cmd()
        .args(["add", "--type", "in", "--item", "nails", "--qty", "1"])
        .assert()
        .failure()
        .stderr(contains("No user selected"));

    env.as_user("alice")
        .args(["add", "--type", "in", "--item", "nails", "--qty", "1", "--project", "P2"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    env.as_user("alice")
        .args(["add", "--type", "in", "--item", "nails", "--qty", "abc"])
        .assert()
        .failure()
        .stderr(contains("Invalid quantity"));
}

#[test]
fn test_delete_record() {
    let env = TestEnv::new("cli_delete");
    env.init_with_data();

    // record 3 is bob's
    env.as_user("alice")
        .args(["del", "--id", "3", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    env.as_user("admin")
        .args(["del", "--id", "3", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    env.as_user("admin")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("3 of 3 shown"));
}

#[test]
fn test_user_management() {
    let env = TestEnv::new("cli_users");
    env.init_with_users();

    env.cmd()
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("bob"))
        .stdout(contains("admin"));

    env.as_user("alice")
        .args(["user", "add", "carol", "--project", "P1"])
        .assert()
        .failure()
        .stderr(contains("not an administrator"));

    env.as_user("admin")
        .args(["user", "del", "bob"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("User 'bob' deleted"));

    env.as_user("admin")
        .args(["user", "del", "admin"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("last administrator"));
}

#[test]
fn test_import_is_admin_only() {
    let env = TestEnv::new("cli_import");
    env.init_with_users();

    let sheet = env.home.join("sheet.csv");
    fs::write(
        &sheet,
        "id,date,operation,item_name,category,quantity,actor_username,project_id,note\n\
         1,2025-01-10,in,screws,hardware,10,alice,P1,\n\
         2,2025-01-11,in,,hardware,1,alice,P1,\n\
         3,2025-01-12,out,screws,hardware,2,alice,P1,\n",
    )
    .expect("write sheet");
    let sheet = sheet.to_string_lossy().to_string();

    env.as_user("alice")
        .args(["import", "--file", &sheet])
        .assert()
        .failure()
        .stderr(contains("not an administrator"));

    env.as_user("admin")
        .args(["import", "--file", &sheet])
        .assert()
        .success()
        .stdout(contains("Imported 2 record(s), skipped 1"));

    env.as_user("alice")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("2 of 2 shown"));
}

#[test]
fn test_csv_backend() {
    let env = TestEnv::new("cli_csv_backend");
    env.init();

    let sheet = env.home.join("stock.csv");
    let conf_dir = env.home.join(".rinventory");
    fs::create_dir_all(&conf_dir).expect("config dir");
    fs::write(
        conf_dir.join("rinventory.conf"),
        format!(
            "database: {}\nbackend: csv\ncsv_file: {}\n",
            env.db,
            sheet.display()
        ),
    )
    .expect("write config");

    env.cmd()
        .args(["user", "add", "admin", "--project", "P0"])
        .assert()
        .success();

    // missing spreadsheet: empty report, not an error
    env.as_user("admin")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("0 of 0 shown"));

    env.add("admin", &["--type", "in", "--item", "rope", "--qty", "2,5", "--date", "2025-05-05"]);

    let content = fs::read_to_string(&sheet).expect("read spreadsheet");
    assert!(content.starts_with("id,date,operation,item_name"));
    assert!(content.contains("2025-05-05,in,rope,unspecified,2.5,admin,P0"));

    env.as_user("admin")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("rope"))
        .stdout(contains("1 of 1 shown"));

    // the active sheet, spelled as a relative path
    env.as_user("admin")
        .current_dir(&env.home)
        .args(["import", "--file", "./stock.csv"])
        .assert()
        .failure()
        .stderr(contains("into itself"));

    env.as_user("admin")
        .arg("report")
        .assert()
        .success()
        .stdout(contains("1 of 1 shown"));
}

#[test]
fn test_log_and_db_info() {
    let env = TestEnv::new("cli_log_info");
    env.init_with_data();

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("user_add"))
        .stdout(contains("migration_applied"));

    env.cmd()
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Records:"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_config_check_and_migrate() {
    let env = TestEnv::new("cli_config");
    env.init();

    let conf_dir = env.home.join(".rinventory");
    fs::create_dir_all(&conf_dir).expect("config dir");
    let conf = conf_dir.join("rinventory.conf");
    fs::write(&conf, format!("database: {}\n", env.db)).expect("write config");

    env.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing keys: backend"));

    env.cmd()
        .args(["config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Added keys"));

    let content = fs::read_to_string(&conf).expect("read config");
    assert!(content.contains("backend: sqlite"));
    assert!(content.contains("decimals: 2"));

    env.cmd()
        .args(["config", "--check", "--print"])
        .assert()
        .success()
        .stdout(contains("complete"))
        .stdout(contains("separator_char"));
}

#[test]
fn test_backup() {
    let env = TestEnv::new("cli_backup");
    env.init_with_data();

    let dest = env.home.join("backup.sqlite");
    let dest = dest.to_string_lossy().to_string();

    env.cmd()
        .args(["backup", "--file", &dest])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&dest).expect("backup exists").len() > 0);

    env.cmd()
        .args(["backup", "--file", &dest, "--compress"])
        .assert()
        .success();
    let zip = env.home.join("backup.zip");
    let bytes = fs::read(&zip).expect("zip exists");
    assert_eq!(&bytes[..2], b"PK");
}
