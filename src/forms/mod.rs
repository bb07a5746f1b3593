//! Form state for the two entity editors.
//!
//! A form owns its field values, per-field validation errors and a submit
//! slot. It never talks to the network itself: the page hands it an
//! `on_submit` callback and the form reports how the attempt went.

pub mod attendance;
pub mod employee;

use std::collections::BTreeMap;

use crate::client::ClientError;

pub const BUSY_LABEL: &str = "Saving...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<K> {
    Create,
    Edit(K),
}

impl<K> FormMode<K> {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Field-scoped validation messages. They never leave the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord> FieldErrors<F> {
    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &F) {
        self.errors.remove(field);
    }

    pub fn get(&self, field: &F) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// A previous submission is still in flight.
    Busy,
    Saved,
    /// The callback failed; the message sits in the submit slot.
    Failed,
}

/// Submit-level state: the in-flight flag and the last failure message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitSlot {
    submitting: bool,
    error: Option<String>,
}

impl SubmitSlot {
    /// Claim the slot. Returns false while another submission is in flight.
    pub fn begin(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.error = None;
        true
    }

    pub fn finish(&mut self, result: Result<(), ClientError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => SubmitOutcome::Saved,
            Err(e) => {
                self.error = Some(e.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
