use crate::db::employees::delete_employee_in;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{NewRole, Role, RoleResolution, RoleRow};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

fn map_role(row: &Row) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get("id")?,
        title: row.get("title")?,
        salary: row.get("salary_cents")?,
        department_id: row.get("department_id")?,
    })
}

fn map_role_row(row: &Row) -> rusqlite::Result<RoleRow> {
    Ok(RoleRow {
        id: row.get("id")?,
        title: row.get("title")?,
        department_name: row.get("department_name")?,
        salary: row.get("salary_cents")?,
    })
}

/// All roles with the name of their department.
pub fn list_roles(pool: &DbPool) -> AppResult<Vec<RoleRow>> {
    debug!("listing roles");
    let mut stmt = pool.conn.prepare_cached(
        "SELECT r.id, r.title, r.salary_cents, d.name AS department_name
         FROM role r
         JOIN department d ON r.department_id = d.id
         ORDER BY r.id ASC",
    )?;

    let rows = stmt.query_map([], map_role_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn find_role(conn: &Connection, id: i64) -> AppResult<Role> {
    conn.query_row(
        "SELECT id, title, salary_cents, department_id FROM role WHERE id = ?1",
        [id],
        map_role,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("Role", id))
}

pub fn get_role(pool: &DbPool, id: i64) -> AppResult<Role> {
    find_role(&pool.conn, id)
}

pub fn add_role(pool: &mut DbPool, role: &NewRole) -> AppResult<Role> {
    pool.conn.execute(
        "INSERT INTO role (title, salary_cents, department_id) VALUES (?1, ?2, ?3)",
        params![role.title, role.salary, role.department_id],
    )?;
    let id = pool.conn.last_insert_rowid();

    info!(id, title = %role.title, department_id = role.department_id, "role added");
    Ok(Role {
        id,
        title: role.title.clone(),
        salary: role.salary,
        department_id: role.department_id,
    })
}

fn holders(conn: &Connection, role_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM employee WHERE role_id = ?1",
        [role_id],
        |row| row.get(0),
    )?)
}

fn delete_role_in(conn: &Connection, id: i64) -> AppResult<()> {
    let remaining = holders(conn, id)?;
    if remaining > 0 {
        return Err(AppError::ConstraintViolation(format!(
            "role #{} is still held by {} employee(s)",
            id, remaining
        )));
    }

    let deleted = conn.execute("DELETE FROM role WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(AppError::not_found("Role", id));
    }
    Ok(())
}

/// Delete a role. Blocked while any employee still holds it.
pub fn delete_role(pool: &mut DbPool, id: i64) -> AppResult<()> {
    pool.transaction(|tx| delete_role_in(tx, id))?;
    info!(id, "role deleted");
    Ok(())
}

/// Resolve the employees holding a role and delete the role, all in one
/// transaction. Returns the number of employees reassigned or deleted.
///
/// Nothing is changed unless every step succeeds.
pub fn delete_role_resolved(
    pool: &mut DbPool,
    role_id: i64,
    resolution: &RoleResolution,
) -> AppResult<usize> {
    let touched = pool.transaction(|tx| {
        find_role(tx, role_id)?;

        let touched = match resolution {
            RoleResolution::Reassign(moves) => {
                for (employee_id, new_role_id) in moves {
                    if *new_role_id == role_id {
                        return Err(AppError::Validation(format!(
                            "employee #{} cannot be reassigned to the role being deleted",
                            employee_id
                        )));
                    }
                    let moved = tx.execute(
                        "UPDATE employee SET role_id = ?1 WHERE id = ?2 AND role_id = ?3",
                        params![new_role_id, employee_id, role_id],
                    )?;
                    if moved == 0 {
                        return Err(AppError::not_found("Employee", *employee_id));
                    }
                }
                moves.len()
            }
            RoleResolution::DeleteEmployees => {
                let ids: Vec<i64> = {
                    let mut stmt =
                        tx.prepare("SELECT id FROM employee WHERE role_id = ?1 ORDER BY id ASC")?;
                    let ids = stmt
                        .query_map([role_id], |row| row.get(0))?
                        .collect::<rusqlite::Result<Vec<i64>>>()?;
                    ids
                };
                for id in &ids {
                    delete_employee_in(tx, *id)?;
                }
                ids.len()
            }
        };

        delete_role_in(tx, role_id)?;
        Ok(touched)
    })?;

    info!(role_id, touched, "role deleted after resolving its employees");
    Ok(touched)
}
