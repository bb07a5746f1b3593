//! Outbound client for the HRMS REST service.

mod error;
#[cfg(test)]
pub mod memory;

pub use error::ClientError;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::model::{
    attendance::{AttendanceFilter, AttendanceRecord, AttendanceUpdate, NewAttendance},
    employee::{Employee, EmployeeUpdate, NewEmployee},
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Fixed bound for every call, after which it fails with [`ClientError::Timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `/employees` collection.
pub trait EmployeeApi {
    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError>;

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ClientError>;

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ClientError>;

    async fn update_employee(
        &self,
        employee_id: &str,
        changes: &EmployeeUpdate,
    ) -> Result<Employee, ClientError>;

    async fn delete_employee(&self, employee_id: &str) -> Result<(), ClientError>;
}

/// `/attendance` collection.
pub trait AttendanceApi {
    /// Only the non-empty subset of `filter` is sent as query parameters.
    async fn list_attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, ClientError>;

    /// `GET /attendance/employee/{employee_id}`. Part of the service contract;
    /// the pages read through `list_attendance` with an `employee_id` filter.
    async fn attendance_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ClientError>;

    async fn create_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, ClientError>;

    async fn update_attendance(
        &self,
        id: &str,
        changes: &AttendanceUpdate,
    ) -> Result<AttendanceRecord, ClientError>;

    async fn delete_attendance(&self, id: &str) -> Result<(), ClientError>;
}

/// Everything the pages need from the backend.
pub trait HrmApi: EmployeeApi + AttendanceApi {}

impl<T: EmployeeApi + AttendanceApi> HrmApi for T {}

/// HTTP implementation of [`HrmApi`].
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Option<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http,
        })
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "HRMS API request");
        self.http.request(method, url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        warn!(status = status.as_u16(), error = %err, "HRMS API rejected request");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.execute(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| self.transport_error(e))
    }

    async fn send_json<B, T>(&self, request: RequestBuilder, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(request.json(body)).await
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            warn!(timeout_ms = self.timeout.as_millis() as u64, "HRMS API call timed out");
            return ClientError::timeout(self.timeout);
        }

        warn!(error = %e, "HRMS API transport failure");
        ClientError::request(e.status().map(|s| s.as_u16()), e.to_string())
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

impl EmployeeApi for ApiClient {
    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        self.fetch(self.request(Method::GET, "/employees")).await
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ClientError> {
        let path = format!("/employees/{}", segment(employee_id));
        self.fetch(self.request(Method::GET, &path)).await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ClientError> {
        self.send_json(self.request(Method::POST, "/employees"), employee)
            .await
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        changes: &EmployeeUpdate,
    ) -> Result<Employee, ClientError> {
        let path = format!("/employees/{}", segment(employee_id));
        self.send_json(self.request(Method::PUT, &path), changes).await
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<(), ClientError> {
        let path = format!("/employees/{}", segment(employee_id));
        self.execute(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}

impl AttendanceApi for ApiClient {
    async fn list_attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let query = filter.query_pairs();
        self.fetch(self.request(Method::GET, "/attendance").query(&query))
            .await
    }

    async fn attendance_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let path = format!("/attendance/employee/{}", segment(employee_id));
        self.fetch(self.request(Method::GET, &path)).await
    }

    async fn create_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, ClientError> {
        self.send_json(self.request(Method::POST, "/attendance"), attendance)
            .await
    }

    async fn update_attendance(
        &self,
        id: &str,
        changes: &AttendanceUpdate,
    ) -> Result<AttendanceRecord, ClientError> {
        let path = format!("/attendance/{}", segment(id));
        self.send_json(self.request(Method::PUT, &path), changes).await
    }

    async fn delete_attendance(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/attendance/{}", segment(id));
        self.execute(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
