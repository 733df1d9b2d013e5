#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use emtrack::db::{DbPool, add_department, add_employee, add_role, open_database};
use emtrack::models::{NewEmployee, NewRole, Salary};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn emtrack() -> Command {
    let mut cmd = cargo_bin_cmd!("emtrack");
    cmd.env("NO_COLOR", "1").env_remove("EMTRACK_DB");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_emtrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB through the CLI, in test mode (no config file written)
pub fn init_db(db_path: &str) {
    emtrack()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Populate the small org chart most tests use, through the library API:
///
/// departments: 1 Engineering, 2 Sales, 3 Legal
/// roles:       1 Engineer 50000 (Eng), 2 Lead 60000 (Eng), 3 Account Rep 40000 (Sales)
/// employees:   1 Ada Lovelace (Lead), 2 Alan Turing (Engineer, mgr 1),
///              3 Grace Hopper (Engineer, mgr 1), 4 Linus Pauling (Account Rep)
pub fn seed(pool: &mut DbPool) {
    for name in ["Engineering", "Sales", "Legal"] {
        add_department(pool, name).expect("add department");
    }
    for (title, salary, dept) in [
        ("Engineer", "50000", 1),
        ("Lead", "60000", 1),
        ("Account Rep", "40000", 2),
    ] {
        let role = NewRole::new(title, Salary::parse(salary).expect("salary"), dept)
            .expect("new role");
        add_role(pool, &role).expect("add role");
    }
    for (first, last, role, manager) in [
        ("Ada", "Lovelace", 2, None),
        ("Alan", "Turing", 1, Some(1)),
        ("Grace", "Hopper", 1, Some(1)),
        ("Linus", "Pauling", 3, None),
    ] {
        let emp = NewEmployee::new(first, last, role, manager).expect("new employee");
        add_employee(pool, &emp).expect("add employee");
    }
}

/// Fresh file database holding the seeded org chart
pub fn seeded_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    let mut pool = open_database(&db_path).expect("open db");
    seed(&mut pool);
    pool.close().expect("close db");
    db_path
}
