#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rinventory::core::add::{AddLogic, NewTransaction};
use rinventory::db::initialize::init_db;
use rinventory::db::pool::DbPool;
use rinventory::models::identity::Identity;
use rinventory::models::record::{RawRecord, Record};
use rinventory::source::{SqliteSource, ingest};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rinv() -> Command {
    cargo_bin_cmd!("rinventory")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rinventory.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Empty directory used as $HOME, so no real configuration leaks into a test
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rinventory_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Isolated environment for one CLI test: its own $HOME and database.
pub struct TestEnv {
    pub home: PathBuf,
    pub db: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        Self {
            home: temp_home(name),
            db: setup_test_db(name),
        }
    }

    /// `rinventory --db <db>` running with the private $HOME
    pub fn cmd(&self) -> Command {
        let mut c = rinv();
        c.env("HOME", &self.home).args(["--db", &self.db]);
        c
    }

    /// Same as [`cmd`](Self::cmd), acting as `user`
    pub fn as_user(&self, user: &str) -> Command {
        let mut c = self.cmd();
        c.args(["--user", user]);
        c
    }

    pub fn init(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
    }

    /// init + admin (project P0), alice (P1), bob (P2)
    pub fn init_with_users(&self) {
        self.init();
        self.cmd()
            .args(["user", "add", "admin", "--project", "P0"])
            .assert()
            .success();
        self.as_user("admin")
            .args(["user", "add", "alice", "--project", "P1"])
            .assert()
            .success();
        self.as_user("admin")
            .args(["user", "add", "bob", "--project", "P2"])
            .assert()
            .success();
    }

    pub fn add(&self, user: &str, args: &[&str]) {
        self.as_user(user).arg("add").args(args).assert().success();
    }

    /// Users plus four movements:
    /// alice: +10 screws, -4 screws (P1); bob: +5 paint (P2); admin: +7 screws (P1)
    pub fn init_with_data(&self) {
        self.init_with_users();
        self.add(
            "alice",
            &["--type", "in", "--item", "screws", "--qty", "10", "--category", "hardware", "--date", "2025-01-10"],
        );
        self.add(
            "alice",
            &["--type", "out", "--item", "screws", "--qty", "4", "--category", "hardware", "--date", "2025-02-01"],
        );
        self.add(
            "bob",
            &["--type", "in", "--item", "paint", "--qty", "5", "--category", "supplies", "--date", "2025-01-15"],
        );
        self.add(
            "admin",
            &[
                "--type", "in", "--item", "screws", "--qty", "7", "--category", "hardware", "--project", "P1",
                "--date", "2025-03-01",
            ],
        );
    }
}

// ---------------------------
// Library helpers
// ---------------------------

/// Raw row with the fields the engine looks at; quantity 1, inbound.
pub fn raw(id: i64, actor: &str, project: &str, category: &str, item: &str, date: &str) -> RawRecord {
    RawRecord {
        id: Some(id),
        date: date.to_string(),
        operation: "in".to_string(),
        item_name: item.to_string(),
        category: category.to_string(),
        quantity: "1".to_string(),
        actor_username: actor.to_string(),
        project_id: project.to_string(),
        note: String::new(),
    }
}

/// Validate rows, failing the test if any is rejected.
pub fn records(raws: &[RawRecord]) -> Vec<Record> {
    let ingested = ingest(raws);
    assert!(
        ingested.rejected.is_empty(),
        "unexpected rejected rows: {:?}",
        ingested.rejected
    );
    ingested.records
}

pub fn admin() -> Identity {
    Identity::new("root", "P0", true)
}

pub fn user(name: &str, project: &str) -> Identity {
    Identity::new(name, project, false)
}

/// Fresh in-memory SQLite source with the full schema.
pub fn memory_source() -> SqliteSource {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    SqliteSource::from_pool(pool)
}

pub fn tx(op: &str, item: &str, qty: f64) -> NewTransaction {
    NewTransaction {
        operation: op.to_string(),
        item_name: item.to_string(),
        quantity: qty,
        date: Some("2025-01-01".to_string()),
        ..Default::default()
    }
}

pub fn record_as(source: &mut SqliteSource, who: &Identity, t: &NewTransaction) -> Record {
    AddLogic::add(source, who, t).expect("add transaction")
}
