use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

pub const APP_TITLE: &str = "HRMS Lite";

/// Top-level navigation. Exactly one tab is active per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    Employees,
    Attendance,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Employees => "Employee Management",
            Tab::Attendance => "Attendance Management",
        }
    }

    pub fn href(&self) -> String {
        format!("/{}", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

pub fn tabs(active: Tab) -> Vec<TabLink> {
    Tab::iter()
        .map(|tab| TabLink {
            label: tab.label(),
            href: tab.href(),
            active: tab == active,
        })
        .collect()
}
