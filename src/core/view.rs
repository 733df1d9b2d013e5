use crate::core::session::Session;
use crate::db::{
    department_budget, list_departments, list_employees, list_employees_by_department,
    list_employees_by_manager, list_managers, list_roles,
};
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::ui::prompt::{Choice, Prompter, choose};
use crate::ui::render::{departments_table, employees_table, roles_table};

impl<P: Prompter> Session<'_, P> {
    pub(crate) fn view_departments(&mut self) -> AppResult<()> {
        let departments = list_departments(self.pool)?;
        if departments.is_empty() {
            warning("No departments yet.");
            return Ok(());
        }
        print!("{}", departments_table(&departments).render());
        Ok(())
    }

    pub(crate) fn view_roles(&mut self) -> AppResult<()> {
        let roles = list_roles(self.pool)?;
        if roles.is_empty() {
            warning("No roles yet.");
            return Ok(());
        }
        print!("{}", roles_table(&roles, &self.currency).render());
        Ok(())
    }

    pub(crate) fn view_employees(&mut self) -> AppResult<()> {
        let employees = list_employees(self.pool)?;
        if employees.is_empty() {
            warning("No employees yet.");
            return Ok(());
        }
        print!("{}", employees_table(&employees, &self.currency).render());
        Ok(())
    }

    pub(crate) fn view_employees_by_manager(&mut self) -> AppResult<()> {
        let managers = list_managers(self.pool)?;
        if managers.is_empty() {
            warning("Nobody manages anyone yet.");
            return Ok(());
        }

        let choices = managers
            .into_iter()
            .map(|m| Choice::new(m.full_name(), m))
            .collect();
        let manager = choose(
            &mut self.prompter,
            "Select the manager to view employees:",
            choices,
        )?;

        let reports = list_employees_by_manager(self.pool, manager.id)?;
        info(format!("Employees managed by {}:", manager.full_name()));
        print!("{}", employees_table(&reports, &self.currency).render());
        Ok(())
    }

    pub(crate) fn view_employees_by_department(&mut self) -> AppResult<()> {
        let Some(department) = self.pick_department("Select the department to view employees:")?
        else {
            warning("No departments yet.");
            return Ok(());
        };

        let employees = list_employees_by_department(self.pool, department.id)?;
        if employees.is_empty() {
            info(format!("No employees in {}.", department.name));
            return Ok(());
        }
        print!("{}", employees_table(&employees, &self.currency).render());
        Ok(())
    }

    pub(crate) fn view_department_budget(&mut self) -> AppResult<()> {
        let Some(department) = self.pick_department("Select the department to view budget:")?
        else {
            warning("No departments yet.");
            return Ok(());
        };

        let budget = department_budget(self.pool, department.id)?;
        info(format!(
            "Total utilized budget for {}: {}",
            department.name,
            self.money(budget)
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::session::Session;
    use crate::db::test_support::seeded_pool;
    use crate::ui::prompt::{Answer, ScriptedPrompter};

    #[test]
    fn every_view_runs_against_seeded_data() {
        let mut pool = seeded_pool();
        let script = vec![
            Answer::select("View All Departments"),
            Answer::select("View All Roles"),
            Answer::select("View All Employees"),
            Answer::select("View Employees by Manager"),
            Answer::select("Ada Lovelace"),
            Answer::select("View Employees by Department"),
            Answer::select("Legal"),
            Answer::select("View Department Budget"),
            Answer::select("Legal"),
            Answer::select("Exit"),
        ];
        let mut session = Session::new(&mut pool, ScriptedPrompter::new(script), "$");
        session.run().unwrap();
        assert_eq!(session.prompter().remaining(), 0);
    }
}
