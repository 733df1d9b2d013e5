use crate::core::session::Session;
use crate::db::{
    add_department, add_employee, add_role, employee_choices, list_departments, list_roles,
};
use crate::errors::AppResult;
use crate::models::{NewEmployee, NewRole, Salary};
use crate::ui::messages::{success, warning};
use crate::ui::prompt::{Choice, Prompter, choose};

impl<P: Prompter> Session<'_, P> {
    pub(crate) fn add_department(&mut self) -> AppResult<()> {
        let name = self
            .prompter
            .text("Enter the name of the new department:")?;

        let department = add_department(self.pool, &name)?;
        success(format!(
            "Added new department: {} (#{})",
            department.name, department.id
        ));
        Ok(())
    }

    pub(crate) fn add_role(&mut self) -> AppResult<()> {
        if list_departments(self.pool)?.is_empty() {
            warning("Add a department before adding roles.");
            return Ok(());
        }

        let title = self.prompter.text("Enter the title of the new role:")?;
        let salary = Salary::parse(&self.prompter.text("Enter the salary for the new role:")?)?;
        let Some(department) = self.pick_department("Select the department for the new role:")?
        else {
            warning("Add a department before adding roles.");
            return Ok(());
        };

        let role = add_role(self.pool, &NewRole::new(&title, salary, department.id)?)?;
        success(format!(
            "Added new role: {} ({}) in {}",
            role.title,
            self.money(role.salary),
            department.name
        ));
        Ok(())
    }

    pub(crate) fn add_employee(&mut self) -> AppResult<()> {
        let roles = list_roles(self.pool)?;
        if roles.is_empty() {
            warning("Add a role before adding employees.");
            return Ok(());
        }

        let first_name = self
            .prompter
            .text("Enter the first name of the new employee:")?;
        let last_name = self
            .prompter
            .text("Enter the last name of the new employee:")?;

        let role_choices = roles
            .into_iter()
            .map(|r| Choice::new(format!("{} ({})", r.title, r.department_name), r.id))
            .collect();
        let role_id = choose(
            &mut self.prompter,
            "Select the role for the new employee:",
            role_choices,
        )?;

        let mut manager_choices = vec![Choice::new("None", None)];
        manager_choices.extend(
            employee_choices(self.pool)?
                .into_iter()
                .map(|e| Choice::new(e.full_name(), Some(e.id))),
        );
        let manager_id = choose(
            &mut self.prompter,
            "Select the manager for the new employee (optional):",
            manager_choices,
        )?;

        let employee = NewEmployee::new(&first_name, &last_name, role_id, manager_id)?;
        let created = add_employee(self.pool, &employee)?;
        success(format!(
            "Added new employee: {} (#{})",
            created.full_name(),
            created.id
        ));
        Ok(())
    }
}
