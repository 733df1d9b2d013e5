/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    ViewEmployeesByManager,
    ViewEmployeesByDepartment,
    ViewDepartmentBudget,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployee,
    DeleteEmployee,
    DeleteRole,
    DeleteDepartment,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 14] = [
        MenuAction::ViewDepartments,
        MenuAction::ViewRoles,
        MenuAction::ViewEmployees,
        MenuAction::ViewEmployeesByManager,
        MenuAction::ViewEmployeesByDepartment,
        MenuAction::ViewDepartmentBudget,
        MenuAction::AddDepartment,
        MenuAction::AddRole,
        MenuAction::AddEmployee,
        MenuAction::UpdateEmployee,
        MenuAction::DeleteEmployee,
        MenuAction::DeleteRole,
        MenuAction::DeleteDepartment,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewDepartments => "View All Departments",
            MenuAction::ViewRoles => "View All Roles",
            MenuAction::ViewEmployees => "View All Employees",
            MenuAction::ViewEmployeesByManager => "View Employees by Manager",
            MenuAction::ViewEmployeesByDepartment => "View Employees by Department",
            MenuAction::ViewDepartmentBudget => "View Department Budget",
            MenuAction::AddDepartment => "Add Department",
            MenuAction::AddRole => "Add Role",
            MenuAction::AddEmployee => "Add Employee",
            MenuAction::UpdateEmployee => "Update Employee Role",
            MenuAction::DeleteEmployee => "Delete Employee",
            MenuAction::DeleteRole => "Delete Role",
            MenuAction::DeleteDepartment => "Delete Department",
            MenuAction::Exit => "Exit",
        }
    }

    /// Question asked before a guarded (add/delete) action runs.
    pub fn confirmation(self) -> Option<&'static str> {
        match self {
            MenuAction::AddDepartment => Some("Are you sure you want to add a new department?"),
            MenuAction::AddRole => Some("Are you sure you want to add a new role?"),
            MenuAction::AddEmployee => Some("Are you sure you want to add a new employee?"),
            MenuAction::DeleteEmployee => Some("Are you sure you want to delete an employee?"),
            MenuAction::DeleteRole => Some("Are you sure you want to delete a role?"),
            MenuAction::DeleteDepartment => Some("Are you sure you want to delete a department?"),
            _ => None,
        }
    }
}
