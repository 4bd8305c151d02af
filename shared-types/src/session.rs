use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::customer::CustomerSearchResult;

/// Progress of the two-step submission. Only moves forward; a new upload or
/// an explicit clear resets it to `NoCustomer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", content = "id", rename_all = "kebab-case")]
pub enum WorkflowState {
    #[default]
    NoCustomer,
    CustomerCreated(String),
    JobCreated(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Default display time for a notification, in milliseconds
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;

/// A message for the operator. `duration_ms == 0` means it stays until replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
    pub created_at: i64,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            severity,
            duration_ms,
            created_at: Utc::now().timestamp(),
        }
    }
}

/// Everything the UI needs to redraw the form
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub workflow: WorkflowState,
    pub fields: BTreeMap<String, String>,
    pub upload_allowed: bool,
    pub description_valid: bool,
    pub customer_submission_enabled: bool,
    pub job_submission_enabled: bool,
}

/// Envelope returned by every session command
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionResponse {
    pub session: SessionSnapshot,
    pub notifications: Vec<Notification>,
}

/// Manual edit of one form field
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldUpdateRequest {
    pub field_id: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSearchResponse {
    pub customers: Vec<CustomerSearchResult>,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum BackendStatus {
    Online,
    Offline,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusResponse {
    pub status: BackendStatus,
    pub notifications: Vec<Notification>,
}
