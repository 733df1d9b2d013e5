use crate::core::session::Session;
use crate::db::{employee_choices, list_roles, update_employee};
use crate::errors::AppResult;
use crate::models::{EmployeeUpdate, UpdateOutcome};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::{Choice, Prompter, choose};

impl<P: Prompter> Session<'_, P> {
    /// Change an employee's role and/or manager. Only fields the user
    /// explicitly changes are sent.
    pub(crate) fn update_employee(&mut self) -> AppResult<()> {
        let Some(employee) = self.pick_employee("Select the employee to update:")? else {
            warning("No employees yet.");
            return Ok(());
        };

        let mut role_choices = vec![Choice::new("Unchanged", None)];
        for role in list_roles(self.pool)? {
            role_choices.push(Choice::new(self.role_label(&role), Some(role.id)));
        }
        let role_id = choose(
            &mut self.prompter,
            "Select the new role for the employee (or leave unchanged):",
            role_choices,
        )?;

        let mut manager_choices = vec![
            Choice::new("Unchanged", None),
            Choice::new("No manager", Some(None)),
        ];
        manager_choices.extend(
            employee_choices(self.pool)?
                .into_iter()
                .filter(|e| e.id != employee.id)
                .map(|e| Choice::new(e.full_name(), Some(Some(e.id)))),
        );
        let manager_id = choose(
            &mut self.prompter,
            "Select the new manager for the employee (or leave unchanged):",
            manager_choices,
        )?;

        let update = EmployeeUpdate {
            role_id,
            manager_id,
        };
        if update.is_empty() {
            info("No changes made to the employee.");
            return Ok(());
        }

        match update_employee(self.pool, employee.id, &update)? {
            UpdateOutcome::Updated => success(format!("Updated {}.", employee.full_name())),
            UpdateOutcome::Unchanged => info("No changes made to the employee."),
        }
        Ok(())
    }
}
