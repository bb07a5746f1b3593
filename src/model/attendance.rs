use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::utils::date_format;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    /// `Present` / `Absent`
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

/// One day of attendance for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Assigned by the service; only used to address updates and deletes.
    #[serde(alias = "_id")]
    pub id: String,
    pub employee_id: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Body of `POST /attendance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub employee_id: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Body of `PUT /attendance/{id}`. Only the status of a record can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
}

/// Filter bar state of the attendance page.
///
/// Doubles as the query string of the page itself, so the same three keys
/// survive every link and form post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl AttendanceFilter {
    /// The non-empty subset of the filter, in a fixed key order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("employee_id", &self.employee_id),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v.to_string()))
        })
        .collect()
    }

    /// Drop blank entries so an empty field behaves exactly like a missing one.
    pub fn normalized(&self) -> Self {
        let mut filter = Self::default();
        for (key, value) in self.query_pairs() {
            match key {
                "employee_id" => filter.employee_id = Some(value),
                "date_from" => filter.date_from = Some(value),
                _ => filter.date_to = Some(value),
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Percent-encoded `k=v&k=v` form of the subset; empty when nothing is set.
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn employee_id(&self) -> &str {
        self.employee_id.as_deref().unwrap_or_default()
    }

    pub fn date_from(&self) -> &str {
        self.date_from.as_deref().unwrap_or_default()
    }

    pub fn date_to(&self) -> &str {
        self.date_to.as_deref().unwrap_or_default()
    }
}
