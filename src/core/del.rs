use crate::core::session::Session;
use crate::db::{
    delete_department, delete_employee, delete_role, delete_role_resolved,
    list_employees_by_role, list_roles,
};
use crate::errors::AppResult;
use crate::models::RoleResolution;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::{Choice, Prompter, choose};
use crate::ui::render::employees_table;

/// What to do with employees that still hold a role being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DependentsAction {
    ModifyRoles,
    DeleteEmployees,
    Cancel,
}

impl<P: Prompter> Session<'_, P> {
    pub(crate) fn delete_employee(&mut self) -> AppResult<()> {
        let Some(employee) = self.pick_employee("Select the employee to remove:")? else {
            warning("No employees yet.");
            return Ok(());
        };

        let detached = delete_employee(self.pool, employee.id)?;
        success(format!("Removed {}.", employee.full_name()));
        if detached > 0 {
            info(format!("{} employee(s) no longer have a manager.", detached));
        }
        Ok(())
    }

    pub(crate) fn delete_department(&mut self) -> AppResult<()> {
        let Some(department) = self.pick_department("Select the department to remove:")? else {
            warning("No departments yet.");
            return Ok(());
        };

        delete_department(self.pool, department.id)?;
        success(format!("Removed department {}.", department.name));
        Ok(())
    }

    /// Delete a role, first resolving the employees who still hold it.
    ///
    /// All choices are collected before anything is written; the
    /// resolution and the delete then run as one unit.
    pub(crate) fn delete_role_checked(&mut self) -> AppResult<()> {
        let Some(role) = self.pick_role("Select the role to remove:")? else {
            warning("No roles yet.");
            return Ok(());
        };

        let holders = list_employees_by_role(self.pool, role.id)?;
        if holders.is_empty() {
            delete_role(self.pool, role.id)?;
            success(format!("Role {} deleted.", role.title));
            return Ok(());
        }

        warning("The following employees are associated with this role:");
        print!("{}", employees_table(&holders, &self.currency).render());

        let action = choose(
            &mut self.prompter,
            "What would you like to do?",
            vec![
                Choice::new("Modify Employee Roles", DependentsAction::ModifyRoles),
                Choice::new("Delete Employees", DependentsAction::DeleteEmployees),
                Choice::new("Cancel", DependentsAction::Cancel),
            ],
        )?;

        let resolution = match action {
            DependentsAction::Cancel => {
                info("Role deletion cancelled.");
                return Ok(());
            }
            DependentsAction::DeleteEmployees => RoleResolution::DeleteEmployees,
            DependentsAction::ModifyRoles => {
                let targets: Vec<_> = list_roles(self.pool)?
                    .into_iter()
                    .filter(|r| r.id != role.id)
                    .collect();
                if targets.is_empty() {
                    warning("There is no other role to move these employees to.");
                    return Ok(());
                }

                let mut moves = Vec::with_capacity(holders.len());
                for employee in &holders {
                    let choices = targets
                        .iter()
                        .map(|r| Choice::new(self.role_label(r), r.id))
                        .collect();
                    let new_role = choose(
                        &mut self.prompter,
                        &format!("Select a new role for {}:", employee.full_name()),
                        choices,
                    )?;
                    moves.push((employee.id, new_role));
                }
                RoleResolution::Reassign(moves)
            }
        };

        let touched = delete_role_resolved(self.pool, role.id, &resolution)?;
        success(format!(
            "Role {} deleted ({} employee(s) {}).",
            role.title,
            touched,
            match resolution {
                RoleResolution::Reassign(_) => "reassigned",
                RoleResolution::DeleteEmployees => "removed",
            }
        ));
        Ok(())
    }
}
