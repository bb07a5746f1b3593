use std::future::Future;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::{BUSY_LABEL, FieldErrors, FormMode, SubmitOutcome, SubmitSlot};
use crate::client::ClientError;
use crate::model::employee::{Employee, EmployeeUpdate, NewEmployee};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmployeeField {
    EmployeeId,
    FullName,
    Email,
    Department,
}

/// Raw fields as posted by the browser. Disabled inputs are not posted, so
/// every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    pub employee_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// What the form hands to its `on_submit` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeSubmission {
    Create(NewEmployee),
    Update {
        employee_id: String,
        changes: EmployeeUpdate,
    },
}

#[derive(Debug, Clone)]
pub struct EmployeeForm {
    mode: FormMode<String>,
    employee_id: String,
    full_name: String,
    email: String,
    department: String,
    errors: FieldErrors<EmployeeField>,
    slot: SubmitSlot,
}

impl EmployeeForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            employee_id: String::new(),
            full_name: String::new(),
            email: String::new(),
            department: String::new(),
            errors: FieldErrors::default(),
            slot: SubmitSlot::default(),
        }
    }

    /// Preload an existing employee. Its id is locked for the life of the form.
    pub fn edit(employee: &Employee) -> Self {
        Self {
            mode: FormMode::Edit(employee.employee_id.clone()),
            employee_id: employee.employee_id.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            errors: FieldErrors::default(),
            slot: SubmitSlot::default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.mode.is_edit()
    }

    /// Key of the employee being edited.
    pub fn editing(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }

    /// Edit a single field and clear that field's error.
    ///
    /// Writes to `employee_id` are ignored in edit mode.
    pub fn set_field(&mut self, field: EmployeeField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EmployeeField::EmployeeId if self.is_edit() => return,
            EmployeeField::EmployeeId => self.employee_id = value,
            EmployeeField::FullName => self.full_name = value,
            EmployeeField::Email => self.email = value,
            EmployeeField::Department => self.department = value,
        }
        self.errors.clear(&field);
    }

    pub fn apply_input(&mut self, input: EmployeeInput) {
        let fields = [
            (EmployeeField::EmployeeId, input.employee_id),
            (EmployeeField::FullName, input.full_name),
            (EmployeeField::Email, input.email),
            (EmployeeField::Department, input.department),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                self.set_field(field, value);
            }
        }
    }

    pub fn value(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::EmployeeId => &self.employee_id,
            EmployeeField::FullName => &self.full_name,
            EmployeeField::Email => &self.email,
            EmployeeField::Department => &self.department,
        }
    }

    pub fn error(&self, field: EmployeeField) -> Option<&str> {
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
            "Edit Employee"
        } else {
            "Add New Employee"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            BUSY_LABEL
        } else if self.is_edit() {
            "Update Employee"
        } else {
            "Add Employee"
        }
    }

    /// Recompute every field error. Returns true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();

        if !self.is_edit() && self.employee_id.trim().is_empty() {
            errors.set(EmployeeField::EmployeeId, "Employee ID is required");
        }

        if self.full_name.trim().is_empty() {
            errors.set(EmployeeField::FullName, "Full name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.set(EmployeeField::Email, "Email is required");
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.set(EmployeeField::Email, "Email is invalid");
        }

        if self.department.trim().is_empty() {
            errors.set(EmployeeField::Department, "Department is required");
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    fn payload(&self) -> EmployeeSubmission {
        match &self.mode {
            FormMode::Create => EmployeeSubmission::Create(NewEmployee {
                employee_id: self.employee_id.trim().to_string(),
                full_name: self.full_name.trim().to_string(),
                email: self.email.trim().to_string(),
                department: self.department.trim().to_string(),
            }),
            FormMode::Edit(employee_id) => EmployeeSubmission::Update {
                employee_id: employee_id.clone(),
                changes: EmployeeUpdate {
                    full_name: Some(self.full_name.trim().to_string()),
                    email: Some(self.email.trim().to_string()),
                    department: Some(self.department.trim().to_string()),
                },
            },
        }
    }

    /// Validate and claim the submit slot.
    pub fn begin_submit(&mut self) -> Result<EmployeeSubmission, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::Busy);
        }
        if !self.validate() {
            debug!(invalid_fields = self.errors.len(), "Employee form rejected");
            return Err(SubmitOutcome::Invalid);
        }
        self.slot.begin();
        Ok(self.payload())
    }

    pub fn finish_submit(&mut self, result: Result<(), ClientError>) -> SubmitOutcome {
        self.slot.finish(result)
    }

    pub async fn submit<F, Fut>(&mut self, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(EmployeeSubmission) -> Fut,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ann() -> Employee {
        Employee {
            employee_id: "E1".into(),
            full_name: "Ann".into(),
            email: "a@b.com".into(),
            department: "Eng".into(),
        }
    }

    fn filled() -> EmployeeForm {
        let mut form = EmployeeForm::create();
        form.apply_input(EmployeeInput {
            employee_id: Some("E1".into()),
            full_name: Some("Ann".into()),
            email: Some("a@b.com".into()),
            department: Some("Eng".into()),
        });
        form
    }

    #[test]
    fn empty_create_form_reports_every_field() {
        let mut form = EmployeeForm::create();
        assert!(!form.validate());
        assert_eq!(form.errors.len(), 4);
        assert_eq!(form.error(EmployeeField::EmployeeId), Some("Employee ID is required"));
        assert_eq!(form.error(EmployeeField::FullName), Some("Full name is required"));
        assert_eq!(form.error(EmployeeField::Email), Some("Email is required"));
        assert_eq!(form.error(EmployeeField::Department), Some("Department is required"));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = filled();
        form.set_field(EmployeeField::FullName, "   ");
        assert!(!form.validate());
        assert_eq!(form.errors.len(), 1);
        assert_eq!(form.error(EmployeeField::FullName), Some("Full name is required"));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["plain", "a@b", "@b.com", "a@.", "a b@c"] {
            let mut form = filled();
            form.set_field(EmployeeField::Email, email);
            assert!(!form.validate(), "{email} should be rejected");
            assert_eq!(form.error(EmployeeField::Email), Some("Email is invalid"));
        }

        let mut form = filled();
        form.set_field(EmployeeField::Email, "ann.lee@corp.example.com");
        assert!(form.validate());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = EmployeeForm::create();
        form.validate();
        form.set_field(EmployeeField::FullName, "Ann");
        assert_eq!(form.error(EmployeeField::FullName), None);
        assert_eq!(form.error(EmployeeField::Email), Some("Email is required"));
        assert_eq!(form.errors.len(), 3);
    }

    #[actix_web::test]
    async fn missing_fields_never_reach_the_callback() {
        let called = Cell::new(false);
        for field in [
            EmployeeField::EmployeeId,
            EmployeeField::FullName,
            EmployeeField::Email,
            EmployeeField::Department,
        ] {
            let mut form = filled();
            form.set_field(field, "");
            let outcome = form
                .submit(|_| async {
                    called.set(true);
                    Ok(())
                })
                .await;
            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert!(form.error(field).is_some());
        }
        assert!(!called.get());
    }

    #[actix_web::test]
    async fn create_submits_trimmed_payload() {
        let mut form = filled();
        form.set_field(EmployeeField::FullName, "  Ann  ");
        let mut sent = None;
        let outcome = form
            .submit(|payload| {
                sent = Some(payload);
                async { Ok(()) }
            })
            .await;
        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(
            sent,
            Some(EmployeeSubmission::Create(NewEmployee {
                employee_id: "E1".into(),
                full_name: "Ann".into(),
                email: "a@b.com".into(),
                department: "Eng".into(),
            }))
        );
    }

    #[actix_web::test]
    async fn edit_mode_locks_employee_id() {
        let mut form = EmployeeForm::edit(&ann());
        assert!(form.is_edit());
        assert_eq!(form.title(), "Edit Employee");
        assert_eq!(form.submit_label(), "Update Employee");

        form.apply_input(EmployeeInput {
            employee_id: Some("HIJACK".into()),
            full_name: Some("Ann Lee".into()),
            ..Default::default()
        });
        form.set_field(EmployeeField::EmployeeId, "");
        assert_eq!(form.value(EmployeeField::EmployeeId), "E1");

        let mut sent = None;
        form.submit(|payload| {
            sent = Some(payload);
            async { Ok(()) }
        })
        .await;
        assert_eq!(
            sent,
            Some(EmployeeSubmission::Update {
                employee_id: "E1".into(),
                changes: EmployeeUpdate {
                    full_name: Some("Ann Lee".into()),
                    email: Some("a@b.com".into()),
                    department: Some("Eng".into()),
                },
            })
        );
    }

    #[actix_web::test]
    async fn failed_submit_keeps_form_populated() {
        let mut form = filled();
        let outcome = form
            .submit(|_| async { Err(ClientError::request(Some(400), "Employee ID already exists")) })
            .await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.submit_error(), Some("Employee ID already exists"));
        assert_eq!(form.value(EmployeeField::FullName), "Ann");
        assert!(!form.is_submitting());

        // a retry clears the previous failure
        let outcome = form.submit(|_| async { Ok(()) }).await;
        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(form.submit_error(), None);
    }

    #[test]
    fn in_flight_submission_blocks_resubmit() {
        let mut form = filled();
        assert_eq!(form.submit_label(), "Add Employee");

        assert!(form.begin_submit().is_ok());
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), BUSY_LABEL);
        assert_eq!(form.begin_submit(), Err(SubmitOutcome::Busy));

        assert_eq!(form.finish_submit(Ok(())), SubmitOutcome::Saved);
        assert_eq!(form.submit_label(), "Add Employee");
    }
}
