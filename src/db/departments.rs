use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Department, Salary, require_text};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

fn map_department(row: &Row) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

pub fn list_departments(pool: &DbPool) -> AppResult<Vec<Department>> {
    debug!("listing departments");
    let mut stmt = pool
        .conn
        .prepare_cached("SELECT id, name FROM department ORDER BY id ASC")?;

    let rows = stmt.query_map([], map_department)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn find_department(conn: &Connection, id: i64) -> AppResult<Department> {
    conn.query_row(
        "SELECT id, name FROM department WHERE id = ?1",
        [id],
        map_department,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("Department", id))
}

pub fn get_department(pool: &DbPool, id: i64) -> AppResult<Department> {
    find_department(&pool.conn, id)
}

pub fn add_department(pool: &mut DbPool, name: &str) -> AppResult<Department> {
    let name = require_text("department name", name)?;

    pool.conn
        .execute("INSERT INTO department (name) VALUES (?1)", params![name])?;
    let id = pool.conn.last_insert_rowid();

    info!(id, name = %name, "department added");
    Ok(Department { id, name })
}

/// Delete a department. Blocked while any role still belongs to it.
pub fn delete_department(pool: &mut DbPool, id: i64) -> AppResult<()> {
    pool.transaction(|tx| {
        let roles: i64 = tx.query_row(
            "SELECT COUNT(*) FROM role WHERE department_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        if roles > 0 {
            return Err(AppError::ConstraintViolation(format!(
                "department #{} still has {} role(s); delete them first",
                id, roles
            )));
        }

        let deleted = tx.execute("DELETE FROM department WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(AppError::not_found("Department", id));
        }
        Ok(())
    })?;

    info!(id, "department deleted");
    Ok(())
}

/// Total salary of every employee holding a role in the department.
///
/// A department without employees has a budget of zero.
pub fn department_budget(pool: &DbPool, id: i64) -> AppResult<Salary> {
    find_department(&pool.conn, id)?;

    let total: Salary = pool.conn.query_row(
        "SELECT COALESCE(SUM(r.salary_cents), 0)
         FROM employee e
         JOIN role r ON e.role_id = r.id
         WHERE r.department_id = ?1",
        [id],
        |row| row.get(0),
    )?;

    debug!(id, total = %total, "department budget");
    Ok(total)
}
