use super::{Salary, require_text};
use crate::errors::AppResult;
use serde::Serialize;

/// A row of the `role` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: i64,
    pub title: String,
    pub salary: Salary,
    pub department_id: i64,
}

/// Role joined with its department, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRow {
    pub id: i64,
    pub title: String,
    pub department_name: String,
    pub salary: Salary,
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub title: String,
    pub salary: Salary,
    pub department_id: i64,
}

impl NewRole {
    pub fn new(title: &str, salary: Salary, department_id: i64) -> AppResult<Self> {
        Ok(Self {
            title: require_text("role title", title)?,
            salary,
            department_id,
        })
    }
}

/// How the employees still holding a role are dealt with before the role
/// itself is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolution {
    /// `(employee_id, new_role_id)` pairs, applied in order.
    Reassign(Vec<(i64, i64)>),
    DeleteEmployees,
}
