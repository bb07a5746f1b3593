use std::collections::HashMap;

use super::{EmptyState, RowIntent, TableView};
use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus},
    employee::Employee,
};
use crate::utils::date_format;

pub const EMPTY: EmptyState = EmptyState {
    title: "No attendance records found",
    hint: "Get started by marking attendance for employees.",
    action: "Mark Attendance",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub id: String,
    /// Full name when the employee is known, the raw id otherwise.
    pub employee_name: String,
    pub employee_id: String,
    /// `Jan 15, 2024`
    pub date: String,
    pub status: AttendanceStatus,
    pub edit: RowIntent,
    pub delete: RowIntent,
}

impl AttendanceRow {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn status_class(&self) -> &'static str {
        match self.status {
            AttendanceStatus::Present => "status-present",
            AttendanceStatus::Absent => "status-absent",
        }
    }
}

/// Footer counts, derived from the rendered rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
}

impl AttendanceSummary {
    pub fn of(rows: &[AttendanceRow]) -> Self {
        rows.iter().fold(Self::default(), |mut summary, row| {
            summary.total += 1;
            match row.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
            }
            summary
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceTable {
    pub view: TableView<AttendanceRow>,
    pub summary: AttendanceSummary,
}

pub fn attendance_table(records: &[AttendanceRecord], employees: &[Employee]) -> AttendanceTable {
    let names: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.employee_id.as_str(), e.full_name.as_str()))
        .collect();

    let rows: Vec<AttendanceRow> = records
        .iter()
        .map(|record| AttendanceRow {
            id: record.id.clone(),
            employee_name: names
                .get(record.employee_id.as_str())
                .copied()
                .unwrap_or(&record.employee_id)
                .to_string(),
            employee_id: record.employee_id.clone(),
            date: date_format::display(&record.date),
            status: record.status,
            edit: RowIntent::Edit(record.id.clone()),
            delete: RowIntent::Delete(record.id.clone()),
        })
        .collect();

    let summary = AttendanceSummary::of(&rows);
    AttendanceTable {
        view: TableView::new(rows, EMPTY),
        summary,
    }
}
