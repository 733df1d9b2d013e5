use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{emtrack, init_db, seeded_db, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");
    init_db(&db_path);

    emtrack()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Departments:"))
        .stdout(contains("$0.00"))
        .stdout(contains("001_create_department"));
}

#[test]
fn test_db_info_counts_rows() {
    let db_path = seeded_db("db_info_counts_rows");

    emtrack()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Employees:"))
        .stdout(contains("$200,000.00"));
}

#[test]
fn test_db_check_and_vacuum() {
    let db_path = seeded_db("db_check_and_vacuum");

    emtrack()
        .args(["--db", &db_path, "db", "--migrate", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("0 of 0 applied"))
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_view_employees_table() {
    let db_path = seeded_db("view_employees_table");

    emtrack()
        .args(["--db", &db_path, "view", "employees"])
        .assert()
        .success()
        .stdout(contains("First Name"))
        .stdout(contains("Grace"))
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("$60,000.00"));
}

#[test]
fn test_view_employees_filtered_by_manager() {
    let db_path = seeded_db("view_employees_by_manager");

    emtrack()
        .args(["--db", &db_path, "view", "employees", "--manager", "1"])
        .assert()
        .success()
        .stdout(contains("Alan").and(contains("Grace")))
        .stdout(contains("Linus").not());
}

#[test]
fn test_view_roles_json() {
    let db_path = seeded_db("view_roles_json");

    let out = emtrack()
        .args(["--db", &db_path, "view", "roles", "--json"])
        .output()
        .expect("run emtrack");
    assert!(out.status.success());

    let roles: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    let roles = roles.as_array().expect("array");
    assert_eq!(roles.len(), 3);
    assert_eq!(roles[0]["title"], "Engineer");
    assert_eq!(roles[0]["department_name"], "Engineering");
}

#[test]
fn test_view_managers_lists_only_managers() {
    let db_path = seeded_db("view_managers");

    emtrack()
        .args(["--db", &db_path, "view", "managers"])
        .assert()
        .success()
        .stdout(contains("Lovelace"))
        .stdout(contains("Turing").not());
}

#[test]
fn test_view_budget() {
    let db_path = seeded_db("view_budget");

    emtrack()
        .args(["--db", &db_path, "view", "budget", "--department", "1"])
        .assert()
        .success()
        .stdout(contains("Engineering: $160,000.00"));

    emtrack()
        .args(["--db", &db_path, "view", "budget", "--department", "3"])
        .assert()
        .success()
        .stdout(contains("Legal: $0.00"));
}

#[test]
fn test_view_budget_requires_department() {
    let db_path = seeded_db("view_budget_requires_department");

    emtrack()
        .args(["--db", &db_path, "view", "budget"])
        .assert()
        .failure()
        .stderr(contains("Error:"))
        .stderr(contains("--department"));
}

#[test]
fn test_view_budget_unknown_department() {
    let db_path = seeded_db("view_budget_unknown_department");

    emtrack()
        .args(["--db", &db_path, "view", "budget", "--department", "99"])
        .assert()
        .failure()
        .stderr(contains("Department #99 not found"));
}

#[test]
fn test_filters_rejected_on_departments() {
    let db_path = seeded_db("filters_rejected_on_departments");

    emtrack()
        .args(["--db", &db_path, "view", "departments", "--role", "1"])
        .assert()
        .failure()
        .stderr(contains("only apply to employees"));
}

#[test]
fn test_menu_needs_a_terminal() {
    let db_path = seeded_db("menu_needs_a_terminal");

    emtrack()
        .args(["--db", &db_path])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("needs a terminal"));
}

#[test]
fn test_db_flag_wins_over_environment() {
    let db_path = seeded_db("db_flag_wins");
    let other = setup_test_db("db_flag_wins_other");

    emtrack()
        .env("EMTRACK_DB", &other)
        .args(["--db", &db_path, "view", "departments"])
        .assert()
        .success()
        .stdout(contains("Engineering"));
}

#[test]
fn test_environment_selects_database() {
    let db_path = seeded_db("env_selects_database");

    emtrack()
        .env("EMTRACK_DB", &db_path)
        .args(["view", "departments", "--json"])
        .assert()
        .success()
        .stdout(contains("\"Legal\""));
}
