use std::time::Duration;

use derive_more::Display;
use serde_json::Value;

/// Failure of an outbound call to the HRMS service.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ClientError {
    /// Non-2xx answer, transport failure or undecodable body.
    #[display(fmt = "{}", message)]
    Request { status: Option<u16>, message: String },

    /// The call did not settle within the client's fixed bound.
    #[display(fmt = "timeout of {}ms exceeded", millis)]
    Timeout { millis: u128 },
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Request {
            status,
            message: message.into(),
        }
    }

    pub fn timeout(bound: Duration) -> Self {
        ClientError::Timeout {
            millis: bound.as_millis(),
        }
    }

    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = detail_message(body)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        ClientError::request(Some(status), message)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => *status,
            ClientError::Timeout { .. } => None,
        }
    }
}

/// Extract the human readable `detail` of an error body.
///
/// FastAPI answers plain errors with `{"detail": "..."}` and schema errors
/// with `{"detail": [{"msg": "...", ...}, ...]}`.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
