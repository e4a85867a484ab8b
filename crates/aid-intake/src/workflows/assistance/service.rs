use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::RequestId;
use super::repository::{
    AssistanceRequestRecord, NotificationPublisher, RepositoryError, RequestNotification,
    RequestRepository, RequestStatus,
};
use super::submission::{ApplicationCreator, CreatedRequest, CreationError, SubmissionPayload};

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> RequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RequestId(format!("req-{id:06}"))
}

/// Creation collaborator backed by a repository and a notification hook.
///
/// The service trusts the wizard's payload shape; it does not repeat the
/// step validation rules.
pub struct AssistanceRequestService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
}

impl<R, N> AssistanceRequestService<R, N>
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Store a new request and announce it. A failed notification is logged but
    /// does not undo the stored request.
    pub fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> Result<AssistanceRequestRecord, AssistanceServiceError> {
        let record = AssistanceRequestRecord {
            request_id: next_request_id(),
            payload,
            status: RequestStatus::Submitted,
            submitted_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            request_id = stored.request_id.as_str(),
            category = %stored.payload.category,
            "assistance request stored"
        );

        let mut details = BTreeMap::new();
        details.insert("category".to_string(), stored.payload.category.to_string());
        details.insert(
            "urgency".to_string(),
            stored.payload.urgency_level.label().to_string(),
        );
        if let Err(error) = self.notifications.publish(RequestNotification {
            template: "request_submitted".to_string(),
            request_id: stored.request_id.clone(),
            details,
        }) {
            warn!(
                %error,
                request_id = stored.request_id.as_str(),
                "submission notification failed"
            );
        }

        Ok(stored)
    }

    pub fn get(
        &self,
        request_id: &RequestId,
    ) -> Result<AssistanceRequestRecord, AssistanceServiceError> {
        let record = self
            .repository
            .fetch(request_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

impl<R, N> ApplicationCreator for AssistanceRequestService<R, N>
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    fn create(&self, payload: SubmissionPayload) -> Result<CreatedRequest, CreationError> {
        match self.submit(payload) {
            Ok(record) => Ok(CreatedRequest {
                request_id: record.request_id,
            }),
            Err(AssistanceServiceError::Repository(RepositoryError::Conflict)) => Err(
                CreationError::Rejected("request already exists".to_string()),
            ),
            Err(other) => Err(CreationError::Unavailable(other.to_string())),
        }
    }
}

/// Error raised by the request service.
#[derive(Debug, thiserror::Error)]
pub enum AssistanceServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
