//! Persistence layer: one function per operation, each a parameterized
//! statement (or a short transaction) against an explicit `DbPool`.

pub mod departments;
pub mod employees;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod roles;
pub mod stats;

pub use departments::{add_department, delete_department, department_budget, list_departments};
pub use employees::{
    add_employee, delete_employee, employee_choices, list_employees,
    list_employees_by_department, list_employees_by_manager, list_employees_by_role,
    list_managers, update_employee,
};
pub use initialize::open_database;
pub use pool::DbPool;
pub use roles::{add_role, delete_role, delete_role_resolved, list_roles};
