//! Askama templates and the flat view models they render.
//!
//! Everything a template needs is precomputed here (hrefs, selected flags,
//! labels) so the templates stay free of logic.

use askama::Template;

use crate::forms::{
    BUSY_LABEL,
    attendance::{AttendanceField, AttendanceForm},
    employee::{EmployeeField, EmployeeForm},
};
use crate::model::attendance::AttendanceStatus;
use crate::pages::{
    Intent, LOADING_LABEL,
    attendance::{self as attendance_page, AttendancePage},
    employee::{self as employee_page, EmployeePage},
};
use crate::shell::{self, Tab, TabLink};
use crate::tables::{EmptyState, RowIntent, attendance::AttendanceSummary};
use strum::IntoEnumIterator;

/// Shared header state for every page.
pub struct PageContext {
    pub app_title: &'static str,
    pub heading: &'static str,
    pub tabs: Vec<TabLink>,
    pub busy_label: &'static str,
    pub loading_label: &'static str,
}

impl PageContext {
    pub fn new(active: Tab) -> Self {
        Self {
            app_title: shell::APP_TITLE,
            heading: active.label(),
            tabs: shell::tabs(active),
            busy_label: BUSY_LABEL,
            loading_label: LOADING_LABEL,
        }
    }
}

/// `path?query`, where the query is the page's own filter plus at most one
/// intent.
pub fn link(path: &str, filter_query: &str, intent: &Intent) -> String {
    let mut pairs = Vec::new();
    if !filter_query.is_empty() {
        pairs.push(filter_query.to_string());
    }
    if let Some((key, value)) = intent.query_pair() {
        pairs.push(format!("{}={}", key, urlencoding::encode(value)));
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

fn row_link(path: &str, filter_query: &str, intent: &RowIntent) -> String {
    link(path, filter_query, &Intent::from(intent.clone()))
}

fn member(path: &str, key: &str, suffix: &str, filter_query: &str) -> String {
    let target = format!("{}/{}{}", path, urlencoding::encode(key), suffix);
    link(&target, filter_query, &Intent::None)
}

pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub disabled: bool,
}

pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct ConfirmView {
    pub message: &'static str,
    pub action: String,
    pub cancel_href: String,
}

pub struct FormFrame {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub cancel_href: String,
    pub submit_error: Option<String>,
}

pub struct EmployeeFormView {
    pub frame: FormFrame,
    pub fields: Vec<FieldView>,
}

pub struct EmployeeRowView {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Template)]
#[template(path = "employees.html")]
pub struct EmployeesTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub create_href: String,
    pub form: Option<EmployeeFormView>,
    pub confirm: Option<ConfirmView>,
    pub rows: Vec<EmployeeRowView>,
    pub empty: Option<EmptyState>,
}

const EMPLOYEES: &str = "/employees";

fn employee_form(form: &EmployeeForm) -> EmployeeFormView {
    let field = |field: EmployeeField,
                 name: &'static str,
                 label: &'static str,
                 input_type: &'static str,
                 placeholder: &'static str| FieldView {
        name,
        label,
        input_type,
        placeholder,
        value: form.value(field).to_string(),
        error: form.error(field).map(str::to_string),
        disabled: form.is_edit() && field == EmployeeField::EmployeeId,
    };

    let action = match form.editing() {
        Some(employee_id) => member(EMPLOYEES, employee_id, "", ""),
        None => EMPLOYEES.to_string(),
    };

    EmployeeFormView {
        frame: FormFrame {
            title: form.title(),
            submit_label: form.submit_label(),
            action,
            cancel_href: EMPLOYEES.to_string(),
            submit_error: form.submit_error().map(str::to_string),
        },
        fields: vec![
            field(EmployeeField::EmployeeId, "employee_id", "Employee ID *", "text", "Enter employee ID"),
            field(EmployeeField::FullName, "full_name", "Full Name *", "text", "Enter full name"),
            field(EmployeeField::Email, "email", "Email Address *", "email", "Enter email address"),
            field(EmployeeField::Department, "department", "Department *", "text", "Enter department"),
        ],
    }
}

pub fn employees(page: &EmployeePage) -> EmployeesTemplate {
    let table = page.table();
    let rows = table
        .rows()
        .iter()
        .map(|row| EmployeeRowView {
            employee_id: row.employee_id.clone(),
            full_name: row.full_name.clone(),
            email: row.email.clone(),
            department: row.department.clone(),
            edit_href: row_link(EMPLOYEES, "", &row.edit),
            delete_href: row_link(EMPLOYEES, "", &row.delete),
        })
        .collect();

    let confirm = page.pending_delete().map(|employee_id| ConfirmView {
        message: employee_page::DELETE_PROMPT,
        action: member(EMPLOYEES, employee_id, "/delete", ""),
        cancel_href: EMPLOYEES.to_string(),
    });

    EmployeesTemplate {
        ctx: PageContext::new(Tab::Employees),
        error: page.error().map(str::to_string),
        create_href: link(EMPLOYEES, "", &Intent::Create),
        form: page.form().map(employee_form),
        confirm,
        rows,
        empty: table.empty_state().copied(),
    }
}

pub struct FilterView {
    pub employees: Vec<OptionView>,
    pub date_from: String,
    pub date_to: String,
    pub clear_href: String,
}

pub struct AttendanceFormView {
    pub frame: FormFrame,
    pub locked: bool,
    pub employees: Vec<OptionView>,
    pub employee_error: Option<String>,
    pub date: String,
    pub date_error: Option<String>,
    pub statuses: Vec<OptionView>,
    pub status_error: Option<String>,
}

pub struct AttendanceRowView {
    pub employee_name: String,
    pub employee_id: String,
    pub date: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Template)]
#[template(path = "attendance.html")]
pub struct AttendanceTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
    pub can_mark: bool,
    pub create_href: String,
    pub filter_action: String,
    pub filter: FilterView,
    pub form: Option<AttendanceFormView>,
    pub confirm: Option<ConfirmView>,
    pub rows: Vec<AttendanceRowView>,
    pub empty: Option<EmptyState>,
    pub summary: AttendanceSummary,
}

const ATTENDANCE: &str = "/attendance";

fn attendance_form(form: &AttendanceForm, filter_query: &str) -> AttendanceFormView {
    let employee_id = form.value(AttendanceField::EmployeeId);
    let status = form.value(AttendanceField::Status);

    let action = match form.editing() {
        Some(id) => member(ATTENDANCE, id, "", filter_query),
        None => link(ATTENDANCE, filter_query, &Intent::None),
    };

    AttendanceFormView {
        frame: FormFrame {
            title: form.title(),
            submit_label: form.submit_label(),
            action,
            cancel_href: link(ATTENDANCE, filter_query, &Intent::None),
            submit_error: form.submit_error().map(str::to_string),
        },
        locked: form.is_locked(AttendanceField::EmployeeId),
        employees: form
            .choices()
            .iter()
            .map(|choice| OptionView {
                value: choice.value.clone(),
                label: choice.label.clone(),
                selected: choice.value == employee_id,
            })
            .collect(),
        employee_error: form.error(AttendanceField::EmployeeId).map(str::to_string),
        date: form.value(AttendanceField::Date).to_string(),
        date_error: form.error(AttendanceField::Date).map(str::to_string),
        statuses: AttendanceStatus::iter()
            .map(|s| OptionView {
                value: s.to_string(),
                label: s.label().to_string(),
                selected: s.as_ref() == status,
            })
            .collect(),
        status_error: form.error(AttendanceField::Status).map(str::to_string),
    }
}

pub fn attendance(page: &AttendancePage) -> AttendanceTemplate {
    let filter_query = page.filter().to_query_string();
    let table = page.table();

    let rows = table
        .view
        .rows()
        .iter()
        .map(|row| AttendanceRowView {
            employee_name: row.employee_name.clone(),
            employee_id: row.employee_id.clone(),
            date: row.date.clone(),
            status_label: row.status_label(),
            status_class: row.status_class(),
            edit_href: row_link(ATTENDANCE, &filter_query, &row.edit),
            delete_href: row_link(ATTENDANCE, &filter_query, &row.delete),
        })
        .collect();

    let filter = FilterView {
        employees: page
            .employees()
            .iter()
            .map(|e| OptionView {
                value: e.employee_id.clone(),
                label: e.option_label(),
                selected: e.employee_id == page.filter().employee_id(),
            })
            .collect(),
        date_from: page.filter().date_from().to_string(),
        date_to: page.filter().date_to().to_string(),
        clear_href: ATTENDANCE.to_string(),
    };

    let confirm = page.pending_delete().map(|id| ConfirmView {
        message: attendance_page::DELETE_PROMPT,
        action: member(ATTENDANCE, id, "/delete", &filter_query),
        cancel_href: link(ATTENDANCE, &filter_query, &Intent::None),
    });

    let can_mark = page.can_mark_attendance();
    AttendanceTemplate {
        ctx: PageContext::new(Tab::Attendance),
        error: page.error().map(str::to_string),
        notice: (!can_mark).then_some(attendance_page::NO_EMPLOYEES_NOTICE),
        can_mark,
        create_href: link(ATTENDANCE, &filter_query, &Intent::Create),
        filter_action: ATTENDANCE.to_string(),
        filter,
        form: page.form().map(|form| attendance_form(form, &filter_query)),
        confirm,
        rows,
        empty: table.view.empty_state().copied(),
        summary: table.summary,
    }
}
