use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{format_amount, AssistanceCategory, UrgencyLevel};
use super::domain::RequestId;
use super::submission::SubmissionPayload;

/// State of a stored request. Review happens outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Submitted,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStatus::Submitted => "submitted",
        }
    }
}

/// Repository record for an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistanceRequestRecord {
    pub request_id: RequestId,
    pub payload: SubmissionPayload,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
}

impl AssistanceRequestRecord {
    pub fn status_view(&self) -> RequestStatusView {
        RequestStatusView {
            request_id: self.request_id.clone(),
            status: self.status.label(),
            title: self.payload.title.clone(),
            category: self.payload.category,
            urgency_level: self.payload.urgency_level,
            requested_amount: format_amount(self.payload.requested_amount),
            submitted_at: self.submitted_at,
        }
    }
}

/// Storage abstraction for created requests.
pub trait RequestRepository: Send + Sync {
    fn insert(
        &self,
        record: AssistanceRequestRecord,
    ) -> Result<AssistanceRequestRecord, RepositoryError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<AssistanceRequestRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for applicant or caseworker notifications.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: RequestNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNotification {
    pub template: String,
    pub request_id: RequestId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Applicant-facing projection of a stored request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusView {
    pub request_id: RequestId,
    pub status: &'static str,
    pub title: String,
    pub category: AssistanceCategory,
    pub urgency_level: UrgencyLevel,
    pub requested_amount: String,
    pub submitted_at: DateTime<Utc>,
}
