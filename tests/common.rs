#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use std::env;
use std::fs;
use std::path::PathBuf;
use timedesk::config::PasswordPolicy;
use timedesk::core::users::UserLogic;
use timedesk::db::initialize::init_db;
use timedesk::db::pool::DbPool;
use timedesk::models::user::{NewUser, Role, User};

pub const PASSWORD: &str = "correct-horse";

/// Binary under test, with HOME pointed away from any real config file.
pub fn td() -> Command {
    let mut cmd = cargo_bin_cmd!("timedesk");
    cmd.env("HOME", env::temp_dir().join("timedesk_test_home"));
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timedesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh in-memory database with the full schema.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

pub fn seed_user(pool: &DbPool, username: &str, role: Role) -> User {
    let input = NewUser {
        username: username.to_string(),
        email: Some(format!("{username}@example.com")),
        password: PASSWORD.to_string(),
        role,
        is_active: true,
    };
    UserLogic::create(pool, &PasswordPolicy::default(), &input, ts("2024-11-01 08:00:00"))
        .expect("seed user")
}

/// Initialize a DB file through the CLI and create an admin `boss` and a user `alice`.
pub fn init_cli_db(db_path: &str) {
    td().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (name, role) in [("boss", "admin"), ("alice", "user")] {
        td().args([
            "--db",
            db_path,
            "user",
            "add",
            name,
            "--password",
            PASSWORD,
            "--email",
            &format!("{name}@example.com"),
            "--role",
            role,
        ])
        .assert()
        .success();
    }
}
