//! Table layouts for departments, roles and employees.

use crate::models::{Department, Employee, EmployeeRow, RoleRow};
use crate::utils::colors::colorize_optional;
use crate::utils::format_currency;
use crate::utils::table::Table;

pub fn departments_table(departments: &[Department]) -> Table {
    let mut t = Table::with_headers(&["ID", "Name"]);
    for d in departments {
        t.add_row(vec![d.id.to_string(), d.name.clone()]);
    }
    t
}

pub fn roles_table(roles: &[RoleRow], currency: &str) -> Table {
    let mut t = Table::with_headers(&["ID", "Title", "Department", "Salary"]);
    for r in roles {
        t.add_row(vec![
            r.id.to_string(),
            r.title.clone(),
            r.department_name.clone(),
            format_currency(r.salary, currency),
        ]);
    }
    t
}

pub fn employees_table(employees: &[EmployeeRow], currency: &str) -> Table {
    let mut t = Table::with_headers(&[
        "ID",
        "First Name",
        "Last Name",
        "Role",
        "Department",
        "Manager",
        "Salary",
    ]);
    for e in employees {
        t.add_row(vec![
            e.id.to_string(),
            e.first_name.clone(),
            e.last_name.clone(),
            e.role_title.clone(),
            e.department_name.clone(),
            colorize_optional(e.manager_name.as_deref()),
            format_currency(e.salary, currency),
        ]);
    }
    t
}

pub fn managers_table(managers: &[Employee]) -> Table {
    let mut t = Table::with_headers(&["ID", "First Name", "Last Name"]);
    for m in managers {
        t.add_row(vec![
            m.id.to_string(),
            m.first_name.clone(),
            m.last_name.clone(),
        ]);
    }
    t
}
