use serde::{Deserialize, Serialize};

/// Employee as stored by the HRMS service.
///
/// `employee_id` is chosen by the user at creation time and never changes
/// afterwards. Server-side bookkeeping fields (e.g. the storage `_id`) are
/// ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Body of `PUT /employees/{employee_id}`.
///
/// Carries no `employee_id`; the record is addressed by the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl From<NewEmployee> for Employee {
    fn from(new: NewEmployee) -> Self {
        Self {
            employee_id: new.employee_id,
            full_name: new.full_name,
            email: new.email,
            department: new.department,
        }
    }
}

impl Employee {
    /// Label used by employee pickers: `Ann Lee (E1)`.
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.full_name, self.employee_id)
    }
}
