//! Page controllers: own a collection, decide between table and form, and
//! run the fetch → mutate → refetch cycle against the API traits.

pub mod attendance;
pub mod employee;

use serde::Deserialize;

use crate::tables::RowIntent;

/// Shown by the browser while a page's collection is being fetched.
pub const LOADING_LABEL: &str = "Loading...";

/// Where a page is in its lifecycle.
#[derive(Debug, Clone)]
pub enum Phase<F> {
    Loading,
    /// Showing the table.
    Ready,
    /// Showing a create or edit form instead of the table.
    ReadyWithForm(F),
}

impl<F> Phase<F> {
    pub fn form(&self) -> Option<&F> {
        match self {
            Phase::ReadyWithForm(form) => Some(form),
            _ => None,
        }
    }
}

/// A user request addressed to a page, carried in its URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Intent {
    #[default]
    None,
    Create,
    Edit(String),
    Delete(String),
}

impl From<RowIntent> for Intent {
    fn from(intent: RowIntent) -> Self {
        match intent {
            RowIntent::Edit(key) => Intent::Edit(key),
            RowIntent::Delete(key) => Intent::Delete(key),
        }
    }
}

impl Intent {
    /// Query parameter that reproduces this intent.
    pub fn query_pair(&self) -> Option<(&'static str, &str)> {
        match self {
            Intent::None => None,
            Intent::Create => Some(("form", "create")),
            Intent::Edit(key) => Some(("edit", key.as_str())),
            Intent::Delete(key) => Some(("delete", key.as_str())),
        }
    }
}

/// `?form=create`, `?edit=<key>` or `?delete=<key>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentQuery {
    pub form: Option<String>,
    pub edit: Option<String>,
    pub delete: Option<String>,
}

impl IntentQuery {
    pub fn intent(&self) -> Intent {
        let key = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(id) = key(&self.edit) {
            Intent::Edit(id)
        } else if let Some(id) = key(&self.delete) {
            Intent::Delete(id)
        } else if self.form.as_deref() == Some("create") {
            Intent::Create
        } else {
            Intent::None
        }
    }
}
