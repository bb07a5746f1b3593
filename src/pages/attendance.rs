use futures::future;
use tracing::{error, info, warn};

use super::{Intent, Phase};
use crate::client::{ClientError, HrmApi};
use crate::forms::{
    SubmitOutcome,
    attendance::{AttendanceForm, AttendanceInput, AttendanceSubmission},
};
use crate::model::{
    attendance::{AttendanceFilter, AttendanceRecord},
    employee::Employee,
};
use crate::tables::attendance::{AttendanceTable, attendance_table};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this attendance record?";
pub const NO_EMPLOYEES_NOTICE: &str = "Please add employees first before marking attendance.";

/// Attendance management: records, the employees they refer to, the filter
/// bar and the open form.
#[derive(Debug, Clone)]
pub struct AttendancePage {
    phase: Phase<AttendanceForm>,
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
    filter: AttendanceFilter,
    error: Option<String>,
    pending_delete: Option<String>,
}

impl Default for AttendancePage {
    fn default() -> Self {
        Self::new()
    }
}

async fn save(api: &impl HrmApi, submission: AttendanceSubmission) -> Result<(), ClientError> {
    match submission {
        AttendanceSubmission::Create(attendance) => {
            let record = api.create_attendance(&attendance).await?;
            info!(
                id = %record.id,
                employee_id = %record.employee_id,
                date = %record.date,
                "Attendance marked"
            );
        }
        AttendanceSubmission::Update { id, changes } => {
            api.update_attendance(&id, &changes).await?;
            info!(id = %id, "Attendance record updated");
        }
    }
    Ok(())
}

impl AttendancePage {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            employees: Vec::new(),
            records: Vec::new(),
            filter: AttendanceFilter::default(),
            error: None,
            pending_delete: None,
        }
    }

    /// Loads employees and records side by side. An empty filter goes through
    /// `clear_filter`, anything else through `apply_filter`. Only a failed
    /// record fetch reaches the banner.
    pub async fn mount(&mut self, api: &impl HrmApi, filter: AttendanceFilter) {
        self.phase = Phase::Loading;
        let filter = filter.normalized();
        let employees = api.list_employees();

        let (employees, ()) = if filter.is_empty() {
            future::join(employees, self.clear_filter(api)).await
        } else {
            future::join(employees, self.apply_filter(api, filter)).await
        };

        match employees {
            Ok(employees) => self.employees = employees,
            Err(e) => warn!(error = %e, "Failed to fetch employees for attendance page"),
        }
        self.phase = Phase::Ready;
    }

    fn take_records(&mut self, records: Result<Vec<AttendanceRecord>, ClientError>) {
        match records {
            Ok(records) => self.records = records,
            Err(e) => {
                error!(
                    error = %e,
                    status = ?e.status(),
                    filter = %self.filter.to_query_string(),
                    "Failed to fetch attendance records"
                );
                self.error = Some(format!("Failed to fetch attendance records: {e}"));
            }
        }
    }

    async fn refresh(&mut self, api: &impl HrmApi) {
        self.error = None;
        let records = api.list_attendance(&self.filter).await;
        self.take_records(records);
    }

    pub async fn apply_filter(&mut self, api: &impl HrmApi, filter: AttendanceFilter) {
        self.filter = filter.normalized();
        self.refresh(api).await;
    }

    pub async fn clear_filter(&mut self, api: &impl HrmApi) {
        self.filter = AttendanceFilter::default();
        self.refresh(api).await;
    }

    pub fn can_mark_attendance(&self) -> bool {
        !self.employees.is_empty()
    }

    /// Refuses while there is nobody to mark.
    pub fn open_create(&mut self) -> bool {
        if !self.can_mark_attendance() {
            return false;
        }
        self.pending_delete = None;
        self.phase = Phase::ReadyWithForm(AttendanceForm::create(&self.employees));
        true
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        self.pending_delete = None;

        let Some(record) = self.records.iter().find(|r| r.id == id) else {
            warn!(id, "Attendance record not in current collection");
            self.error = Some("Attendance record not found".to_string());
            return false;
        };

        self.phase = Phase::ReadyWithForm(AttendanceForm::edit(record, &self.employees));
        true
    }

    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::ReadyWithForm(_)) {
            self.phase = Phase::Ready;
        }
    }

    /// Same protocol as the employee page; the refetch keeps the filter.
    pub async fn submit(
        &mut self,
        api: &impl HrmApi,
        input: AttendanceInput,
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

    pub fn request_delete(&mut self, id: &str) {
        self.phase = Phase::Ready;
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self, api: &impl HrmApi) -> Option<Result<(), ClientError>> {
        let id = self.pending_delete.take()?;

        match api.delete_attendance(&id).await {
            Ok(()) => {
                info!(id = %id, "Attendance record deleted");
                self.refresh(api).await;
                Some(Ok(()))
            }
            Err(e) => {
                error!(
                    error = %e,
                    status = ?e.status(),
                    id = %id,
                    "Failed to delete attendance record"
                );
                self.error = Some(format!("Failed to delete attendance record: {e}"));
                Some(Err(e))
            }
        }
    }

    /// Same URL contract as the employee page: no intent means the plain
    /// table.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::None => {
                self.cancel();
                self.cancel_delete();
            }
            Intent::Create => {
                self.open_create();
            }
            Intent::Edit(id) => {
                self.open_edit(&id);
            }
            Intent::Delete(id) => self.request_delete(&id),
        }
    }

    pub fn form(&self) -> Option<&AttendanceForm> {
        self.phase.form()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn filter(&self) -> &AttendanceFilter {
        &self.filter
    }

    pub fn table(&self) -> AttendanceTable {
        attendance_table(&self.records, &self.employees)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }
}
