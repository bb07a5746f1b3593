use std::future::Future;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use super::{BUSY_LABEL, FieldErrors, FormMode, SubmitOutcome, SubmitSlot};
use crate::client::ClientError;
use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus, AttendanceUpdate, NewAttendance},
    employee::Employee,
};
use crate::utils::date_format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttendanceField {
    EmployeeId,
    Date,
    Status,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceInput {
    pub employee_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceSubmission {
    Create(NewAttendance),
    Update {
        id: String,
        changes: AttendanceUpdate,
    },
}

/// One entry of the employee picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeChoice {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct AttendanceForm {
    mode: FormMode<String>,
    employee_id: String,
    date: String,
    status: String,
    choices: Vec<EmployeeChoice>,
    errors: FieldErrors<AttendanceField>,
    slot: SubmitSlot,
}

fn choices(employees: &[Employee]) -> Vec<EmployeeChoice> {
    employees
        .iter()
        .map(|e| EmployeeChoice {
            value: e.employee_id.clone(),
            label: e.option_label(),
        })
        .collect()
}

impl AttendanceForm {
    /// New record for today, marked present, with no employee picked yet.
    pub fn create(employees: &[Employee]) -> Self {
        Self {
            mode: FormMode::Create,
            employee_id: String::new(),
            date: date_format::today(),
            status: AttendanceStatus::default().to_string(),
            choices: choices(employees),
            errors: FieldErrors::default(),
            slot: SubmitSlot::default(),
        }
    }

    /// Existing record: employee and date are locked, only the status moves.
    pub fn edit(record: &AttendanceRecord, employees: &[Employee]) -> Self {
        Self {
            mode: FormMode::Edit(record.id.clone()),
            employee_id: record.employee_id.clone(),
            date: record.date.format(date_format::WIRE_FORMAT).to_string(),
            status: record.status.to_string(),
            choices: choices(employees),
            errors: FieldErrors::default(),
            slot: SubmitSlot::default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.mode.is_edit()
    }

    pub fn editing(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn is_locked(&self, field: AttendanceField) -> bool {
        self.is_edit() && matches!(field, AttendanceField::EmployeeId | AttendanceField::Date)
    }

    pub fn set_field(&mut self, field: AttendanceField, value: impl Into<String>) {
        if self.is_locked(field) {
            return;
        }
        let value = value.into();
        match field {
            AttendanceField::EmployeeId => self.employee_id = value,
            AttendanceField::Date => self.date = value,
            AttendanceField::Status => self.status = value,
        }
        self.errors.clear(&field);
    }

    pub fn apply_input(&mut self, input: AttendanceInput) {
        let fields = [
            (AttendanceField::EmployeeId, input.employee_id),
            (AttendanceField::Date, input.date),
            (AttendanceField::Status, input.status),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                self.set_field(field, value);
            }
        }
    }

    pub fn value(&self, field: AttendanceField) -> &str {
        match field {
            AttendanceField::EmployeeId => &self.employee_id,
            AttendanceField::Date => &self.date,
            AttendanceField::Status => &self.status,
        }
    }

    pub fn choices(&self) -> &[EmployeeChoice] {
        &self.choices
    }

    pub fn error(&self, field: AttendanceField) -> Option<&str> {
        self.errors.get(&field)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.slot.error()
    }

    pub fn is_submitting(&self) -> bool {
        self.slot.is_submitting()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Attendance Record"
        } else {
            "Mark Attendance"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            BUSY_LABEL
        } else if self.is_edit() {
            "Update Record"
        } else {
            "Mark Attendance"
        }
    }

    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();

        // A new record must name someone from the picker. Edits keep the
        // record's own employee, which may no longer be listed.
        let employee_id = self.employee_id.trim();
        let listed = self.choices.iter().any(|c| c.value == employee_id);
        if employee_id.is_empty() || (!self.is_edit() && !listed) {
            errors.set(AttendanceField::EmployeeId, "Employee is required");
        }
        if date_format::parse(&self.date).is_none() {
            errors.set(AttendanceField::Date, "Date is required");
        }
        if AttendanceStatus::from_str(self.status.trim()).is_err() {
            errors.set(AttendanceField::Status, "Status is required");
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    fn payload(&self) -> Option<AttendanceSubmission> {
        let status = AttendanceStatus::from_str(self.status.trim()).ok()?;
        let submission = match &self.mode {
            FormMode::Create => AttendanceSubmission::Create(NewAttendance {
                employee_id: self.employee_id.trim().to_string(),
                date: date_format::parse(&self.date)?,
                status,
            }),
            FormMode::Edit(id) => AttendanceSubmission::Update {
                id: id.clone(),
                changes: AttendanceUpdate {
                    status: Some(status),
                },
            },
        };
        Some(submission)
    }

    pub fn begin_submit(&mut self) -> Result<AttendanceSubmission, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::Busy);
        }
        if !self.validate() {
            debug!(invalid_fields = self.errors.len(), "Attendance form rejected");
            return Err(SubmitOutcome::Invalid);
        }
        let payload = self.payload().ok_or(SubmitOutcome::Invalid)?;
        self.slot.begin();
        Ok(payload)
    }

    pub fn finish_submit(&mut self, result: Result<(), ClientError>) -> SubmitOutcome {
        self.slot.finish(result)
    }

    pub async fn submit<F, Fut>(&mut self, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(AttendanceSubmission) -> Fut,
        Fut: Future<Output = Result<(), ClientError>>,
    {
        match self.begin_submit() {
            Ok(payload) => {
                let result = on_submit(payload).await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }
}
