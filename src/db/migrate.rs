use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};
use tracing::info;

/// Ordered schema migrations. Versions are never renamed once released.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250301_0001_create_department",
        r#"
        CREATE TABLE IF NOT EXISTS department (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL CHECK(length(trim(name)) > 0)
        );
        "#,
    ),
    (
        "20250301_0002_create_role",
        r#"
        CREATE TABLE IF NOT EXISTS role (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            title          TEXT NOT NULL CHECK(length(trim(title)) > 0),
            salary_cents   INTEGER NOT NULL CHECK(salary_cents >= 0),
            department_id  INTEGER NOT NULL REFERENCES department(id)
        );
        "#,
    ),
    (
        "20250301_0003_create_employee",
        r#"
        CREATE TABLE IF NOT EXISTS employee (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name  TEXT NOT NULL CHECK(length(first_name) BETWEEN 1 AND 30),
            last_name   TEXT NOT NULL CHECK(length(last_name) BETWEEN 1 AND 30),
            role_id     INTEGER NOT NULL REFERENCES role(id),
            manager_id  INTEGER REFERENCES employee(id)
        );
        "#,
    ),
    (
        "20250312_0004_foreign_key_indexes",
        r#"
        CREATE INDEX IF NOT EXISTS idx_role_department ON role(department_id);
        CREATE INDEX IF NOT EXISTS idx_employee_role ON employee(role_id);
        CREATE INDEX IF NOT EXISTS idx_employee_manager ON employee(manager_id);
        "#,
    ),
];

/// Ensure that the `schema_migrations` bookkeeping table exists.
fn ensure_migrations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Each migration runs in its own transaction together with its bookkeeping
/// row. Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_migrations_table(conn)?;

    let mut applied = Vec::new();
    for (version, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;
        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )?;
        tx.commit()?;

        info!(version, "migration applied");
        applied.push(*version);
    }

    Ok(applied)
}

/// Versions recorded in `schema_migrations`, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_migrations_table(conn)?;
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn pending_count(conn: &Connection) -> AppResult<usize> {
    ensure_migrations_table(conn)?;
    let mut pending = 0;
    for (version, _) in MIGRATIONS {
        if !is_applied(conn, version)? {
            pending += 1;
        }
    }
    Ok(pending)
}
