use crate::db::migrate::applied_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Salary;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::format_currency;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub departments: i64,
    pub roles: i64,
    pub employees: i64,
    pub managers: i64,
    pub payroll: Salary,
}

pub fn collect(pool: &DbPool) -> AppResult<DbStats> {
    let count = |sql: &str| -> AppResult<i64> { Ok(pool.conn.query_row(sql, [], |row| row.get(0))?) };

    Ok(DbStats {
        departments: count("SELECT COUNT(*) FROM department")?,
        roles: count("SELECT COUNT(*) FROM role")?,
        employees: count("SELECT COUNT(*) FROM employee")?,
        managers: count(
            "SELECT COUNT(DISTINCT manager_id) FROM employee WHERE manager_id IS NOT NULL",
        )?,
        payroll: pool.conn.query_row(
            "SELECT COALESCE(SUM(r.salary_cents), 0)
             FROM employee e JOIN role r ON e.role_id = r.id",
            [],
            |row| row.get(0),
        )?,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str, currency: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    let stats = collect(pool)?;
    println!("{}• Departments:{} {}{}{}", CYAN, RESET, GREEN, stats.departments, RESET);
    println!("{}• Roles:{} {}{}{}", CYAN, RESET, GREEN, stats.roles, RESET);
    println!("{}• Employees:{} {}{}{}", CYAN, RESET, GREEN, stats.employees, RESET);
    println!("{}• Managers:{} {}{}{}", CYAN, RESET, GREEN, stats.managers, RESET);
    println!(
        "{}• Total payroll:{} {}",
        CYAN,
        RESET,
        format_currency(stats.payroll, currency)
    );

    //
    // 3) SCHEMA
    //
    let versions = applied_migrations(&pool.conn)?;
    println!("{}• Migrations:{}", CYAN, RESET);
    if versions.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for v in versions {
        println!("    {}", v);
    }

    println!();
    Ok(())
}
