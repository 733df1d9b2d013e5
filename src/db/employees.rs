use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, EmployeeRow, EmployeeUpdate, NewEmployee, UpdateOutcome};
use rusqlite::{Connection, OptionalExtension, Params, Row, params};
use tracing::{debug, info};

/// Employee joined with role, department and (optionally) manager.
/// Callers append a `WHERE` clause and the ordering.
const EMPLOYEE_ROW_SELECT: &str = "
    SELECT e.id, e.first_name, e.last_name,
           r.title AS role_title, r.salary_cents,
           d.name AS department_name,
           CASE WHEN m.id IS NULL THEN NULL
                ELSE m.first_name || ' ' || m.last_name END AS manager_name
    FROM employee e
    JOIN role r ON e.role_id = r.id
    JOIN department d ON r.department_id = d.id
    LEFT JOIN employee m ON e.manager_id = m.id";

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        role_id: row.get("role_id")?,
        manager_id: row.get("manager_id")?,
    })
}

fn map_employee_row(row: &Row) -> rusqlite::Result<EmployeeRow> {
    Ok(EmployeeRow {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        role_title: row.get("role_title")?,
        salary: row.get("salary_cents")?,
        department_name: row.get("department_name")?,
        manager_name: row.get("manager_name")?,
    })
}

fn query_employee_rows<P: Params>(
    pool: &DbPool,
    filter: &str,
    params: P,
) -> AppResult<Vec<EmployeeRow>> {
    let sql = format!("{} {} ORDER BY e.id ASC", EMPLOYEE_ROW_SELECT, filter);
    let mut stmt = pool.conn.prepare_cached(&sql)?;

    let rows = stmt.query_map(params, map_employee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_employees(pool: &DbPool) -> AppResult<Vec<EmployeeRow>> {
    debug!("listing employees");
    query_employee_rows(pool, "", [])
}

pub fn list_employees_by_department(pool: &DbPool, department_id: i64) -> AppResult<Vec<EmployeeRow>> {
    debug!(department_id, "listing employees by department");
    query_employee_rows(pool, "WHERE d.id = ?1", [department_id])
}

pub fn list_employees_by_manager(pool: &DbPool, manager_id: i64) -> AppResult<Vec<EmployeeRow>> {
    debug!(manager_id, "listing employees by manager");
    query_employee_rows(pool, "WHERE e.manager_id = ?1", [manager_id])
}

pub fn list_employees_by_role(pool: &DbPool, role_id: i64) -> AppResult<Vec<EmployeeRow>> {
    debug!(role_id, "listing employees by role");
    query_employee_rows(pool, "WHERE e.role_id = ?1", [role_id])
}

fn query_employees(pool: &DbPool, sql: &str) -> AppResult<Vec<Employee>> {
    let mut stmt = pool.conn.prepare_cached(sql)?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Employees that are the manager of at least one other employee.
pub fn list_managers(pool: &DbPool) -> AppResult<Vec<Employee>> {
    debug!("listing managers");
    query_employees(
        pool,
        "SELECT DISTINCT m.id, m.first_name, m.last_name, m.role_id, m.manager_id
         FROM employee m
         JOIN employee e ON e.manager_id = m.id
         ORDER BY m.id ASC",
    )
}

/// Every employee, for pickers.
pub fn employee_choices(pool: &DbPool) -> AppResult<Vec<Employee>> {
    query_employees(
        pool,
        "SELECT id, first_name, last_name, role_id, manager_id
         FROM employee
         ORDER BY id ASC",
    )
}

pub(crate) fn find_employee(conn: &Connection, id: i64) -> AppResult<Employee> {
    conn.query_row(
        "SELECT id, first_name, last_name, role_id, manager_id FROM employee WHERE id = ?1",
        [id],
        map_employee,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("Employee", id))
}

pub fn get_employee(pool: &DbPool, id: i64) -> AppResult<Employee> {
    find_employee(&pool.conn, id)
}

pub fn add_employee(pool: &mut DbPool, employee: &NewEmployee) -> AppResult<Employee> {
    pool.conn.execute(
        "INSERT INTO employee (first_name, last_name, role_id, manager_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            employee.first_name,
            employee.last_name,
            employee.role_id,
            employee.manager_id
        ],
    )?;
    let id = pool.conn.last_insert_rowid();

    info!(id, role_id = employee.role_id, "employee added");
    Ok(Employee {
        id,
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        role_id: employee.role_id,
        manager_id: employee.manager_id,
    })
}

/// True when `employee_id` already sits somewhere above `manager_id` in the
/// management chain (or is the same employee).
fn would_create_cycle(conn: &Connection, employee_id: i64, manager_id: i64) -> AppResult<bool> {
    Ok(conn.query_row(
        "WITH RECURSIVE chain(id) AS (
             SELECT ?1
             UNION
             SELECT e.manager_id
             FROM employee e
             JOIN chain c ON e.id = c.id
             WHERE e.manager_id IS NOT NULL
         )
         SELECT EXISTS(SELECT 1 FROM chain WHERE id = ?2)",
        params![manager_id, employee_id],
        |row| row.get(0),
    )?)
}

/// Apply the changed fields of `update` to an employee.
///
/// An empty update issues no statement and reports `Unchanged`.
pub fn update_employee(
    pool: &mut DbPool,
    employee_id: i64,
    update: &EmployeeUpdate,
) -> AppResult<UpdateOutcome> {
    if update.is_empty() {
        debug!(employee_id, "empty employee update");
        return Ok(UpdateOutcome::Unchanged);
    }

    pool.transaction(|tx| {
        find_employee(tx, employee_id)?;

        // A missing manager is left to the foreign key.
        if let Some(Some(manager_id)) = update.manager_id {
            if would_create_cycle(tx, employee_id, manager_id)? {
                return Err(AppError::Validation(format!(
                    "employee #{} cannot report to #{}: that would create a management cycle",
                    employee_id, manager_id
                )));
            }
        }

        tx.execute(
            "UPDATE employee
             SET role_id    = CASE WHEN ?1 THEN ?2 ELSE role_id END,
                 manager_id = CASE WHEN ?3 THEN ?4 ELSE manager_id END
             WHERE id = ?5",
            params![
                update.role_id.is_some(),
                update.role_id,
                update.manager_id.is_some(),
                update.manager_id.flatten(),
                employee_id
            ],
        )?;
        Ok(())
    })?;

    info!(employee_id, ?update, "employee updated");
    Ok(UpdateOutcome::Updated)
}

/// Detach direct reports, then delete the employee. Callers provide the
/// transaction. Returns the number of detached reports.
pub(crate) fn delete_employee_in(conn: &Connection, employee_id: i64) -> AppResult<usize> {
    let detached = conn.execute(
        "UPDATE employee SET manager_id = NULL WHERE manager_id = ?1",
        [employee_id],
    )?;

    let deleted = conn.execute("DELETE FROM employee WHERE id = ?1", [employee_id])?;
    if deleted == 0 {
        return Err(AppError::not_found("Employee", employee_id));
    }
    Ok(detached)
}

/// Delete an employee. Anyone they managed is left without a manager.
pub fn delete_employee(pool: &mut DbPool, employee_id: i64) -> AppResult<usize> {
    let detached = pool.transaction(|tx| delete_employee_in(tx, employee_id))?;
    info!(employee_id, detached, "employee deleted");
    Ok(detached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{count, seeded_pool};

    fn names(rows: &[EmployeeRow]) -> Vec<String> {
        rows.iter().map(|r| r.full_name()).collect()
    }

    #[test]
    fn employees_are_listed_with_role_department_and_manager() {
        let pool = seeded_pool();
        let all = list_employees(&pool).unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(all[0].manager_name, None);
        assert_eq!(all[1].role_title, "Engineer");
        assert_eq!(all[1].department_name, "Engineering");
        assert_eq!(all[1].manager_name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn filtered_listings() {
        let pool = seeded_pool();
        assert_eq!(
            names(&list_employees_by_department(&pool, 1).unwrap()),
            ["Ada Lovelace", "Alan Turing", "Grace Hopper"]
        );
        assert_eq!(
            names(&list_employees_by_manager(&pool, 1).unwrap()),
            ["Alan Turing", "Grace Hopper"]
        );
        assert_eq!(
            names(&list_employees_by_role(&pool, 3).unwrap()),
            ["Linus Pauling"]
        );
        assert!(list_employees_by_department(&pool, 3).unwrap().is_empty());
    }

    #[test]
    fn managers_are_distinct() {
        let pool = seeded_pool();
        let managers = list_managers(&pool).unwrap();
        assert_eq!(managers.len(), 1);
        assert_eq!(managers[0].full_name(), "Ada Lovelace");
    }

    #[test]
    fn employee_with_missing_role_is_rejected() {
        let mut pool = seeded_pool();
        let emp = NewEmployee::new("No", "Role", 77, None).unwrap();
        assert!(matches!(
            add_employee(&mut pool, &emp),
            Err(AppError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn employee_with_missing_manager_is_rejected() {
        let mut pool = seeded_pool();
        let emp = NewEmployee::new("No", "Boss", 1, Some(77)).unwrap();
        assert!(matches!(
            add_employee(&mut pool, &emp),
            Err(AppError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn deleting_a_manager_detaches_reports() {
        let mut pool = seeded_pool();
        let detached = delete_employee(&mut pool, 1).unwrap();

        assert_eq!(detached, 2);
        assert_eq!(get_employee(&pool, 2).unwrap().manager_id, None);
        assert_eq!(get_employee(&pool, 3).unwrap().manager_id, None);
        assert!(list_employees(&pool).unwrap().iter().all(|e| e.id != 1));
    }

    #[test]
    fn deleting_a_missing_employee_changes_nothing() {
        let mut pool = seeded_pool();
        assert!(matches!(
            delete_employee(&mut pool, 42),
            Err(AppError::NotFound { .. })
        ));
        assert_eq!(count(&pool, "employee"), 4);
    }

    #[test]
    fn empty_update_leaves_row_untouched() {
        let mut pool = seeded_pool();
        let before = get_employee(&pool, 2).unwrap();

        let outcome = update_employee(&mut pool, 2, &EmployeeUpdate::default()).unwrap();

        assert_eq!(outcome, UpdateOutcome::Unchanged);
        assert_eq!(get_employee(&pool, 2).unwrap(), before);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut pool = seeded_pool();

        let role_only = EmployeeUpdate {
            role_id: Some(2),
            ..Default::default()
        };
        assert_eq!(
            update_employee(&mut pool, 2, &role_only).unwrap(),
            UpdateOutcome::Updated
        );
        let e = get_employee(&pool, 2).unwrap();
        assert_eq!((e.role_id, e.manager_id), (2, Some(1)));

        let clear_manager = EmployeeUpdate {
            manager_id: Some(None),
            ..Default::default()
        };
        update_employee(&mut pool, 2, &clear_manager).unwrap();
        let e = get_employee(&pool, 2).unwrap();
        assert_eq!((e.role_id, e.manager_id), (2, None));

        let new_manager = EmployeeUpdate {
            manager_id: Some(Some(4)),
            ..Default::default()
        };
        update_employee(&mut pool, 2, &new_manager).unwrap();
        assert_eq!(get_employee(&pool, 2).unwrap().manager_id, Some(4));
    }

    #[test]
    fn update_of_missing_employee_is_not_found() {
        let mut pool = seeded_pool();
        let update = EmployeeUpdate {
            role_id: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            update_employee(&mut pool, 99, &update),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn update_to_missing_role_is_a_constraint_violation() {
        let mut pool = seeded_pool();
        let update = EmployeeUpdate {
            role_id: Some(99),
            ..Default::default()
        };
        assert!(matches!(
            update_employee(&mut pool, 2, &update),
            Err(AppError::ConstraintViolation(_))
        ));
        assert_eq!(get_employee(&pool, 2).unwrap().role_id, 1);
    }

    #[test]
    fn update_to_missing_manager_is_a_constraint_violation() {
        let mut pool = seeded_pool();
        let update = EmployeeUpdate {
            manager_id: Some(Some(99)),
            ..Default::default()
        };
        assert!(matches!(
            update_employee(&mut pool, 2, &update),
            Err(AppError::ConstraintViolation(_))
        ));
        assert_eq!(get_employee(&pool, 2).unwrap().manager_id, Some(1));
    }

    #[test]
    fn failure_after_detaching_reports_restores_their_manager() {
        let mut pool = seeded_pool();
        let res: AppResult<usize> = pool.transaction(|tx| {
            let detached = delete_employee_in(tx, 1)?;
            assert_eq!(detached, 2);
            Err(AppError::Validation("abort".into()))
        });
        assert!(res.is_err());

        assert!(get_employee(&pool, 1).is_ok());
        assert_eq!(get_employee(&pool, 2).unwrap().manager_id, Some(1));
        assert_eq!(get_employee(&pool, 3).unwrap().manager_id, Some(1));
    }

    #[test]
    fn management_cycles_are_rejected() {
        let mut pool = seeded_pool();

        let self_managed = EmployeeUpdate {
            manager_id: Some(Some(2)),
            ..Default::default()
        };
        assert!(matches!(
            update_employee(&mut pool, 2, &self_managed),
            Err(AppError::Validation(_))
        ));

        // Ada manages Alan; Ada reporting to Alan closes the loop.
        let loop_back = EmployeeUpdate {
            manager_id: Some(Some(2)),
            ..Default::default()
        };
        assert!(matches!(
            update_employee(&mut pool, 1, &loop_back),
            Err(AppError::Validation(_))
        ));
        assert_eq!(get_employee(&pool, 1).unwrap().manager_id, None);
    }
}
