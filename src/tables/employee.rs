use super::{EmptyState, RowIntent, TableView};
use crate::model::employee::Employee;

pub const EMPTY: EmptyState = EmptyState {
    title: "No employees found",
    hint: "Get started by adding a new employee.",
    action: "Add Employee",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub edit: RowIntent,
    pub delete: RowIntent,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            edit: RowIntent::Edit(employee.employee_id.clone()),
            delete: RowIntent::Delete(employee.employee_id.clone()),
        }
    }
}

pub fn employee_table(employees: &[Employee]) -> TableView<EmployeeRow> {
    TableView::new(employees.iter().map(EmployeeRow::from).collect(), EMPTY)
}
