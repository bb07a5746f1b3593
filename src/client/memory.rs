//! In-process stand-in for the HRMS service, used by page and handler tests.
//!
//! It applies the same rules the real service enforces (unique employee ids,
//! one attendance record per employee and day, referential checks) so the
//! pages can be driven through complete workflows without a network.

use std::sync::Mutex;

use super::{AttendanceApi, ClientError, EmployeeApi};
use crate::model::{
    attendance::{AttendanceFilter, AttendanceRecord, AttendanceUpdate, NewAttendance},
    employee::{Employee, EmployeeUpdate, NewEmployee},
};

#[derive(Default)]
struct State {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    next_id: u64,
    calls: Vec<String>,
    offline: bool,
    fail_employee_list: bool,
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

fn bad_request(detail: &str) -> ClientError {
    ClientError::request(Some(400), detail)
}

fn not_found(detail: &str) -> ClientError {
    ClientError::request(Some(404), detail)
}

/// Present fields overwrite; the key stays.
fn apply_update(employee: &mut Employee, changes: &EmployeeUpdate) {
    if let Some(full_name) = &changes.full_name {
        employee.full_name = full_name.clone();
    }
    if let Some(email) = &changes.email {
        employee.email = email.clone();
    }
    if let Some(department) = &changes.department {
        employee.department = department.clone();
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let backend = Self::new();
        backend.state.lock().unwrap().employees = employees;
        backend
    }

    pub fn seed_attendance(&self, records: Vec<AttendanceRecord>) {
        self.state.lock().unwrap().attendance.extend(records);
    }

    /// Every call fails as if the service were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Only `GET /employees` fails.
    pub fn fail_employee_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_employee_list = fail;
    }

    /// Calls received so far, as `METHOD path[?query]`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.state.lock().unwrap().employees.clone()
    }

    pub fn attendance(&self) -> Vec<AttendanceRecord> {
        self.state.lock().unwrap().attendance.clone()
    }

    fn enter(&self, call: String) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.offline {
            return Err(ClientError::request(None, "error sending request"));
        }
        Ok(state)
    }
}

impl EmployeeApi for InMemoryBackend {
    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        let state = self.enter("GET /employees".into())?;
        if state.fail_employee_list {
            return Err(ClientError::request(Some(500), "Request failed with status code 500"));
        }
        Ok(state.employees.clone())
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ClientError> {
        let state = self.enter(format!("GET /employees/{employee_id}"))?;
        state
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned()
            .ok_or_else(|| not_found("Employee not found"))
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ClientError> {
        let mut state = self.enter("POST /employees".into())?;
        if state
            .employees
            .iter()
            .any(|e| e.employee_id == employee.employee_id)
        {
            return Err(bad_request("Employee ID already exists"));
        }
        if state.employees.iter().any(|e| e.email == employee.email) {
            return Err(bad_request("Email already exists"));
        }
        let created = Employee::from(employee.clone());
        state.employees.push(created.clone());
        Ok(created)
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        changes: &EmployeeUpdate,
    ) -> Result<Employee, ClientError> {
        let mut state = self.enter(format!("PUT /employees/{employee_id}"))?;
        let employee = state
            .employees
            .iter_mut()
            .find(|e| e.employee_id == employee_id)
            .ok_or_else(|| not_found("Employee not found"))?;
        apply_update(employee, changes);
        Ok(employee.clone())
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<(), ClientError> {
        let mut state = self.enter(format!("DELETE /employees/{employee_id}"))?;
        let before = state.employees.len();
        state.employees.retain(|e| e.employee_id != employee_id);
        if state.employees.len() == before {
            return Err(not_found("Employee not found"));
        }
        Ok(())
    }
}

impl AttendanceApi for InMemoryBackend {
    async fn list_attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let query = filter.to_query_string();
        let call = if query.is_empty() {
            "GET /attendance".to_string()
        } else {
            format!("GET /attendance?{query}")
        };
        let state = self.enter(call)?;

        let filter = filter.normalized();
        let from = filter.date_from.as_deref().and_then(crate::utils::date_format::parse);
        let to = filter.date_to.as_deref().and_then(crate::utils::date_format::parse);
        let mut records: Vec<AttendanceRecord> = state
            .attendance
            .iter()
            .filter(|r| filter.employee_id.as_deref().is_none_or(|id| r.employee_id == id))
            .filter(|r| from.is_none_or(|from| r.date >= from))
            .filter(|r| to.is_none_or(|to| r.date <= to))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn attendance_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let state = self.enter(format!("GET /attendance/employee/{employee_id}"))?;
        if !state.employees.iter().any(|e| e.employee_id == employee_id) {
            return Err(not_found("Employee not found"));
        }
        Ok(state
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn create_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, ClientError> {
        let mut state = self.enter("POST /attendance".into())?;
        if !state
            .employees
            .iter()
            .any(|e| e.employee_id == attendance.employee_id)
        {
            return Err(bad_request("Employee not found"));
        }
        if state
            .attendance
            .iter()
            .any(|r| r.employee_id == attendance.employee_id && r.date == attendance.date)
        {
            return Err(bad_request(
                "Attendance already marked for this employee on this date",
            ));
        }
        state.next_id += 1;
        let record = AttendanceRecord {
            id: format!("att-{}", state.next_id),
            employee_id: attendance.employee_id.clone(),
            date: attendance.date,
            status: attendance.status,
        };
        state.attendance.push(record.clone());
        Ok(record)
    }

    async fn update_attendance(
        &self,
        id: &str,
        changes: &AttendanceUpdate,
    ) -> Result<AttendanceRecord, ClientError> {
        let mut state = self.enter(format!("PUT /attendance/{id}"))?;
        let record = state
            .attendance
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("Attendance record not found"))?;
        if let Some(status) = changes.status {
            record.status = status;
        }
        Ok(record.clone())
    }

    async fn delete_attendance(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.enter(format!("DELETE /attendance/{id}"))?;
        let before = state.attendance.len();
        state.attendance.retain(|r| r.id != id);
        if state.attendance.len() == before {
            return Err(not_found("Attendance record not found"));
        }
        Ok(())
    }
}
