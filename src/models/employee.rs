use super::{Salary, require_text};
use crate::errors::AppResult;
use serde::Serialize;

/// Longest first/last name the `employee` table accepts.
pub const MAX_NAME_LEN: usize = 30;

/// A row of the `employee` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i64,
    pub manager_id: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employee joined with role, department and manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role_title: String,
    pub salary: Salary,
    pub department_name: String,
    pub manager_name: Option<String>,
}

impl EmployeeRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: i64,
    pub manager_id: Option<i64>,
}

impl NewEmployee {
    /// Names are trimmed, must not be empty and are cut to `MAX_NAME_LEN` chars.
    pub fn new(
        first_name: &str,
        last_name: &str,
        role_id: i64,
        manager_id: Option<i64>,
    ) -> AppResult<Self> {
        Ok(Self {
            first_name: truncate_name(&require_text("first name", first_name)?),
            last_name: truncate_name(&require_text("last name", last_name)?),
            role_id,
            manager_id,
        })
    }
}

fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

/// The fields of an employee that may change after creation.
///
/// `manager_id: Some(None)` removes the current manager, `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub role_id: Option<i64>,
    pub manager_id: Option<Option<i64>>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.role_id.is_none() && self.manager_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Unchanged,
    Updated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn long_names_are_truncated_on_char_boundaries() {
        let long = "Bartholomäus-Maximilian-Wolfgang-Amadeus";
        let e = NewEmployee::new(long, "Ng", 1, None).unwrap();
        assert_eq!(e.first_name.chars().count(), MAX_NAME_LEN);
        assert!(long.starts_with(&e.first_name));
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            NewEmployee::new("  ", "Ng", 1, None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(EmployeeUpdate::default().is_empty());
        let clear_manager = EmployeeUpdate {
            manager_id: Some(None),
            ..Default::default()
        };
        assert!(!clear_manager.is_empty());
    }
}
