pub mod department;
pub mod employee;
pub mod role;
pub mod salary;

pub use department::Department;
pub use employee::{Employee, EmployeeRow, EmployeeUpdate, NewEmployee, UpdateOutcome};
pub use role::{NewRole, Role, RoleResolution, RoleRow};
pub use salary::Salary;

use crate::errors::{AppError, AppResult};

/// Trim a required text field and reject it when nothing is left.
pub fn require_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
