use crate::cli::parser::{Commands, ViewTarget};
use crate::config::Config;
use crate::db::departments::get_department;
use crate::db::{
    DbPool, department_budget, list_departments, list_employees, list_employees_by_department,
    list_employees_by_manager, list_employees_by_role, list_managers, list_roles, open_database,
};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::ui::render::{departments_table, employees_table, managers_table, roles_table};
use crate::utils::format_currency;
use crate::utils::table::Table;
use serde::Serialize;
use serde_json::json;

/// Handle the `view` subcommand: the menu's listings, printed once.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::View {
        target,
        department,
        manager,
        role,
        json,
    } = cmd
    {
        let filtered = department.is_some() || manager.is_some() || role.is_some();
        let pool = open_database(&cfg.database)?;

        match target {
            ViewTarget::Employees => {
                let rows = match (department, manager, role) {
                    (Some(id), _, _) => list_employees_by_department(&pool, *id)?,
                    (_, Some(id), _) => list_employees_by_manager(&pool, *id)?,
                    (_, _, Some(id)) => list_employees_by_role(&pool, *id)?,
                    _ => list_employees(&pool)?,
                };
                emit(*json, &rows, || employees_table(&rows, &cfg.currency_symbol))?;
            }
            ViewTarget::Budget => {
                let id = department.ok_or_else(|| {
                    AppError::Validation("`view budget` needs --department ID".into())
                })?;
                print_budget(&pool, id, *json, &cfg.currency_symbol)?;
            }
            _ if filtered => {
                return Err(AppError::Validation(
                    "--department, --manager and --role only apply to employees and budget".into(),
                ));
            }
            ViewTarget::Departments => {
                let rows = list_departments(&pool)?;
                emit(*json, &rows, || departments_table(&rows))?;
            }
            ViewTarget::Roles => {
                let rows = list_roles(&pool)?;
                emit(*json, &rows, || roles_table(&rows, &cfg.currency_symbol))?;
            }
            ViewTarget::Managers => {
                let rows = list_managers(&pool)?;
                emit(*json, &rows, || managers_table(&rows))?;
            }
        }

        pool.close()?;
    }

    Ok(())
}

/// Print `rows` as pretty JSON, or as the table built by `table`.
fn emit<T, F>(json: bool, rows: &[T], table: F) -> AppResult<()>
where
    T: Serialize,
    F: FnOnce() -> Table,
{
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    let table = table();
    if table.is_empty() {
        warning("Nothing to show.");
    } else {
        print!("{}", table.render());
    }
    Ok(())
}

fn print_budget(pool: &DbPool, department_id: i64, json: bool, currency: &str) -> AppResult<()> {
    let department = get_department(pool, department_id)?;
    let budget = department_budget(pool, department_id)?;

    if json {
        let value = json!({
            "department_id": department.id,
            "department": department.name,
            "budget": budget,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        info(format!(
            "Total utilized budget for {}: {}",
            department.name,
            format_currency(budget, currency)
        ));
    }
    Ok(())
}
