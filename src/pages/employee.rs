use tracing::{error, info};

use super::{Intent, Phase};
use crate::client::{ClientError, EmployeeApi};
use crate::forms::{
    SubmitOutcome,
    employee::{EmployeeForm, EmployeeInput, EmployeeSubmission},
};
use crate::model::employee::Employee;
use crate::tables::{
    TableView,
    employee::{EmployeeRow, employee_table},
};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

/// Employee management: the collection, the open form and the banner.
#[derive(Debug, Clone)]
pub struct EmployeePage {
    phase: Phase<EmployeeForm>,
    employees: Vec<Employee>,
    error: Option<String>,
    pending_delete: Option<String>,
}

impl Default for EmployeePage {
    fn default() -> Self {
        Self::new()
    }
}

async fn save(api: &impl EmployeeApi, submission: EmployeeSubmission) -> Result<(), ClientError> {
    match submission {
        EmployeeSubmission::Create(employee) => {
            let created = api.create_employee(&employee).await?;
            info!(employee_id = %created.employee_id, "Employee created");
        }
        EmployeeSubmission::Update {
            employee_id,
            changes,
        } => {
            api.update_employee(&employee_id, &changes).await?;
            info!(employee_id = %employee_id, "Employee updated");
        }
    }
    Ok(())
}

impl EmployeePage {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            employees: Vec::new(),
            error: None,
            pending_delete: None,
        }
    }

    /// First fetch. On failure the page is still ready, with an empty table
    /// and the banner set.
    pub async fn mount(&mut self, api: &impl EmployeeApi) {
        self.phase = Phase::Loading;
        self.refresh(api).await;
        self.phase = Phase::Ready;
    }

    async fn refresh(&mut self, api: &impl EmployeeApi) {
        self.error = None;
        match api.list_employees().await {
            Ok(employees) => self.employees = employees,
            Err(e) => {
                error!(error = %e, status = ?e.status(), "Failed to fetch employees");
                self.error = Some(format!("Failed to fetch employees: {e}"));
            }
        }
    }

    pub fn open_create(&mut self) {
        self.pending_delete = None;
        self.phase = Phase::ReadyWithForm(EmployeeForm::create());
    }

    /// Prefills from the loaded row, falling back to a single fetch.
    pub async fn open_edit(&mut self, api: &impl EmployeeApi, employee_id: &str) -> bool {
        self.pending_delete = None;

        let loaded = self
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned();
        let employee = match loaded {
            Some(employee) => employee,
            None => match api.get_employee(employee_id).await {
                Ok(employee) => employee,
                Err(e) => {
                    error!(error = %e, employee_id, "Failed to load employee");
                    self.error = Some(format!("Failed to load employee: {e}"));
                    return false;
                }
            },
        };

        self.phase = Phase::ReadyWithForm(EmployeeForm::edit(&employee));
        true
    }

    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::ReadyWithForm(_)) {
            self.phase = Phase::Ready;
        }
    }

    /// Feeds `input` to the open form and submits it. `None` when no form is
    /// open. A saved form closes and the collection is refetched.
    pub async fn submit(
        &mut self,
        api: &impl EmployeeApi,
        input: EmployeeInput,
    ) -> Option<SubmitOutcome> {
        let Phase::ReadyWithForm(form) = &mut self.phase else {
            return None;
        };

        form.apply_input(input);
        let outcome = form.submit(|submission| save(api, submission)).await;

        if outcome == SubmitOutcome::Saved {
            self.phase = Phase::Ready;
            self.refresh(api).await;
        }
        Some(outcome)
    }

    pub fn request_delete(&mut self, employee_id: &str) {
        self.phase = Phase::Ready;
        self.pending_delete = Some(employee_id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the employee awaiting confirmation. On failure the collection
    /// is left as it was and the banner carries the server's message.
    pub async fn confirm_delete(
        &mut self,
        api: &impl EmployeeApi,
    ) -> Option<Result<(), ClientError>> {
        let employee_id = self.pending_delete.take()?;

        match api.delete_employee(&employee_id).await {
            Ok(()) => {
                info!(employee_id = %employee_id, "Employee deleted");
                self.refresh(api).await;
                Some(Ok(()))
            }
            Err(e) => {
                error!(
                    error = %e,
                    status = ?e.status(),
                    employee_id = %employee_id,
                    "Failed to delete employee"
                );
                self.error = Some(format!("Failed to delete employee: {e}"));
                Some(Err(e))
            }
        }
    }

    /// A URL without an intent is the plain table, so it also serves as the
    /// cancel target for both the form and the delete prompt.
    pub async fn apply(&mut self, api: &impl EmployeeApi, intent: Intent) {
        match intent {
            Intent::None => {
                self.cancel();
                self.cancel_delete();
            }
            Intent::Create => self.open_create(),
            Intent::Edit(employee_id) => {
                self.open_edit(api, &employee_id).await;
            }
            Intent::Delete(employee_id) => self.request_delete(&employee_id),
        }
    }

    pub fn form(&self) -> Option<&EmployeeForm> {
        self.phase.form()
    }

    pub fn table(&self) -> TableView<EmployeeRow> {
        employee_table(&self.employees)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }
}
