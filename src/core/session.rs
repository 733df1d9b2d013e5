use crate::core::menu::MenuAction;
use crate::db::pool::DbPool;
use crate::db::{employee_choices, list_departments, list_roles};
use crate::errors::{AppError, AppResult};
use crate::models::{Department, Employee, RoleRow};
use crate::ui::messages::{error, header, info, success};
use crate::ui::prompt::{Choice, Prompter, choose};
use crate::utils::format_currency;
use tracing::{debug, warn};

/// One interactive session: a menu loop over an open database.
///
/// The session owns no data of its own; every action reads fresh rows
/// through the persistence layer.
pub struct Session<'a, P: Prompter> {
    pub(crate) pool: &'a mut DbPool,
    pub(crate) prompter: P,
    pub(crate) currency: String,
}

impl<'a, P: Prompter> Session<'a, P> {
    pub fn new(pool: &'a mut DbPool, prompter: P, currency: &str) -> Self {
        Self {
            pool,
            prompter,
            currency: currency.to_string(),
        }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run the menu until the user picks "Exit" (or aborts at the menu).
    ///
    /// Failed actions are reported and the menu comes back; only prompt
    /// and terminal failures end the session with an error.
    pub fn run(&mut self) -> AppResult<()> {
        header("Employee Management Tracker");

        loop {
            let action = match self.select_action() {
                Ok(action) => action,
                Err(AppError::Cancelled) => MenuAction::Exit,
                Err(e) => return Err(e),
            };

            if action == MenuAction::Exit {
                success("Goodbye!");
                return Ok(());
            }

            debug!(?action, "menu action selected");
            match self.perform(action) {
                Ok(()) => {}
                Err(AppError::Cancelled) => info("Cancelled, nothing was changed."),
                Err(e) if e.is_recoverable() => {
                    warn!(?action, error = %e, "action failed");
                    error(&e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn select_action(&mut self) -> AppResult<MenuAction> {
        let choices = MenuAction::ALL
            .into_iter()
            .map(|a| Choice::new(a.label(), a))
            .collect();
        choose(&mut self.prompter, "What would you like to do?", choices)
    }

    /// Run a single menu action, including its confirmation step.
    pub fn perform(&mut self, action: MenuAction) -> AppResult<()> {
        if let Some(question) = action.confirmation()
            && !self.prompter.confirm(question)?
        {
            info("Nothing was changed.");
            return Ok(());
        }

        match action {
            MenuAction::ViewDepartments => self.view_departments(),
            MenuAction::ViewRoles => self.view_roles(),
            MenuAction::ViewEmployees => self.view_employees(),
            MenuAction::ViewEmployeesByManager => self.view_employees_by_manager(),
            MenuAction::ViewEmployeesByDepartment => self.view_employees_by_department(),
            MenuAction::ViewDepartmentBudget => self.view_department_budget(),
            MenuAction::AddDepartment => self.add_department(),
            MenuAction::AddRole => self.add_role(),
            MenuAction::AddEmployee => self.add_employee(),
            MenuAction::UpdateEmployee => self.update_employee(),
            MenuAction::DeleteEmployee => self.delete_employee(),
            MenuAction::DeleteRole => self.delete_role_checked(),
            MenuAction::DeleteDepartment => self.delete_department(),
            MenuAction::Exit => Ok(()),
        }
    }

    pub(crate) fn money(&self, amount: crate::models::Salary) -> String {
        format_currency(amount, &self.currency)
    }

    pub(crate) fn role_label(&self, role: &RoleRow) -> String {
        format!(
            "{} ({}) - {}",
            role.title,
            role.department_name,
            self.money(role.salary)
        )
    }

    /// `None` when there is no department to pick from.
    pub(crate) fn pick_department(&mut self, message: &str) -> AppResult<Option<Department>> {
        let departments = list_departments(self.pool)?;
        if departments.is_empty() {
            return Ok(None);
        }
        let choices = departments
            .into_iter()
            .map(|d| Choice::new(d.name.clone(), d))
            .collect();
        choose(&mut self.prompter, message, choices).map(Some)
    }

    /// `None` when there is no role to pick from.
    pub(crate) fn pick_role(&mut self, message: &str) -> AppResult<Option<RoleRow>> {
        let roles = list_roles(self.pool)?;
        if roles.is_empty() {
            return Ok(None);
        }
        let choices = roles
            .into_iter()
            .map(|r| Choice::new(self.role_label(&r), r))
            .collect();
        choose(&mut self.prompter, message, choices).map(Some)
    }

    /// `None` when there is no employee to pick from.
    pub(crate) fn pick_employee(&mut self, message: &str) -> AppResult<Option<Employee>> {
        let employees = employee_choices(self.pool)?;
        if employees.is_empty() {
            return Ok(None);
        }
        let choices = employees
            .into_iter()
            .map(|e| Choice::new(e.full_name(), e))
            .collect();
        choose(&mut self.prompter, message, choices).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{count, seeded_pool};
    use crate::ui::prompt::{Answer, ScriptedPrompter};

    fn run_script(pool: &mut DbPool, answers: Vec<Answer>) -> AppResult<ScriptedPrompter> {
        let mut session = Session::new(pool, ScriptedPrompter::new(answers), "$");
        session.run()?;
        let Session { prompter, .. } = session;
        Ok(prompter)
    }

    #[test]
    fn exit_ends_the_session() {
        let mut pool = seeded_pool();
        let p = run_script(&mut pool, vec![Answer::select("Exit")]).unwrap();
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn cancelling_at_the_menu_exits() {
        let mut pool = seeded_pool();
        run_script(&mut pool, vec![Answer::Cancel]).unwrap();
    }

    #[test]
    fn failed_action_returns_to_the_menu() {
        let mut pool = seeded_pool();
        // Engineering still has roles, the delete fails, the menu comes back.
        let p = run_script(
            &mut pool,
            vec![
                Answer::select("Delete Department"),
                Answer::Confirm(true),
                Answer::select("Engineering"),
                Answer::select("View All Departments"),
                Answer::select("Exit"),
            ],
        )
        .unwrap();

        assert_eq!(p.remaining(), 0);
        assert_eq!(count(&pool, "department"), 3);
    }

    #[test]
    fn declined_confirmation_has_no_side_effects() {
        let mut pool = seeded_pool();
        let p = run_script(
            &mut pool,
            vec![
                Answer::select("Add Department"),
                Answer::Confirm(false),
                Answer::select("Exit"),
            ],
        )
        .unwrap();

        assert_eq!(count(&pool, "department"), 3);
        assert!(!p.asked().iter().any(|m| m.contains("name")));
    }

    #[test]
    fn cancelling_mid_action_returns_to_the_menu() {
        let mut pool = seeded_pool();
        run_script(
            &mut pool,
            vec![
                Answer::select("Add Employee"),
                Answer::Confirm(true),
                Answer::text("Marie"),
                Answer::Cancel,
                Answer::select("Exit"),
            ],
        )
        .unwrap();
        assert_eq!(count(&pool, "employee"), 4);
    }

    #[test]
    fn running_out_of_answers_is_an_error() {
        let mut pool = seeded_pool();
        let res = run_script(&mut pool, vec![Answer::select("View All Roles")]);
        assert!(matches!(res, Err(AppError::Prompt(_))));
    }
}
