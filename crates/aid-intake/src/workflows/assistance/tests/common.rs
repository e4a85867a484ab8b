use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::assistance::catalog::{AssistanceCategory, UrgencyLevel};
use crate::workflows::assistance::domain::{
    ApplicationDraft, FileCandidate, ProgramRef, ProgramType, RequestId,
};
use crate::workflows::assistance::opportunity::{AnnouncementData, OpportunityContext};
use crate::workflows::assistance::repository::{
    AssistanceRequestRecord, NotificationError, NotificationPublisher, RepositoryError,
    RequestNotification, RequestRepository,
};
use crate::workflows::assistance::submission::{
    ApplicationCreator, CreatedRequest, CreationError, SubmissionPayload,
};
use crate::workflows::assistance::{assistance_router, AssistanceRequestService};

pub(super) fn valid_draft() -> ApplicationDraft {
    ApplicationDraft {
        title: "Roof repair after storm".to_string(),
        description: "The storm damaged the roof of our family home.".to_string(),
        requested_amount: 2500,
        category: Some(AssistanceCategory::EmergencyAssistance),
        urgency_level: UrgencyLevel::Urgent,
        program: Some(ProgramRef {
            kind: ProgramType::Announcement,
            id: "ann-42".to_string(),
        }),
        documents: Vec::new(),
        tags: vec!["emergency_relief".to_string()],
    }
}

pub(super) fn pdf(name: &str, byte_size: u64) -> FileCandidate {
    FileCandidate::new(name, byte_size, "application/pdf")
}

pub(super) fn announcement_context(kind: &str) -> OpportunityContext {
    OpportunityContext {
        service_category: None,
        program_type: None,
        program_id: Some("ann-42".to_string()),
        service_name: Some("Winter Relief Fund".to_string()),
        max_amount: Some(3000.0),
        announcement_data: Some(AnnouncementData {
            title: "Winter relief grants".to_string(),
            description: "Support for households affected by the storm".to_string(),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
            requirements: vec!["Proof of residence".to_string()],
            kind: kind.to_string(),
            budget: Some(250_000.0),
        }),
    }
}

pub(super) fn build_service() -> (
    AssistanceRequestService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = AssistanceRequestService::new(repository.clone(), notifications.clone());
    (service, repository, notifications)
}

pub(super) fn router_with_service(
    service: AssistanceRequestService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    assistance_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RequestId, AssistanceRequestRecord>>>,
}

impl RequestRepository for MemoryRepository {
    fn insert(
        &self,
        record: AssistanceRequestRecord,
    ) -> Result<AssistanceRequestRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.request_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.request_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<AssistanceRequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictRepository;

impl RequestRepository for ConflictRepository {
    fn insert(
        &self,
        _record: AssistanceRequestRecord,
    ) -> Result<AssistanceRequestRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<AssistanceRequestRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl RequestRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: AssistanceRequestRecord,
    ) -> Result<AssistanceRequestRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<AssistanceRequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<RequestNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<RequestNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: RequestNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifications;

impl NotificationPublisher for OfflineNotifications {
    fn publish(&self, _notification: RequestNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp down".to_string()))
    }
}

/// Creation collaborator that records every payload and answers with a fixed result.
pub(super) struct ScriptedCreator {
    result: Result<CreatedRequest, CreationError>,
    calls: AtomicUsize,
    payloads: Mutex<Vec<SubmissionPayload>>,
}

impl ScriptedCreator {
    pub(super) fn succeeding(request_id: &str) -> Self {
        Self::with_result(Ok(CreatedRequest {
            request_id: RequestId(request_id.to_string()),
        }))
    }

    pub(super) fn failing() -> Self {
        Self::with_result(Err(CreationError::Unavailable(
            "connection reset".to_string(),
        )))
    }

    fn with_result(result: Result<CreatedRequest, CreationError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }
}

impl ApplicationCreator for ScriptedCreator {
    fn create(&self, payload: SubmissionPayload) -> Result<CreatedRequest, CreationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(payload);
        self.result.clone()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Creation collaborator that parks inside `create` until released.
pub(super) struct BlockingCreator {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl BlockingCreator {
    pub(super) fn new(entered: mpsc::Sender<()>, release: mpsc::Receiver<()>) -> Self {
        Self {
            entered: Mutex::new(entered),
            release: Mutex::new(release),
        }
    }
}

impl ApplicationCreator for BlockingCreator {
    fn create(&self, _payload: SubmissionPayload) -> Result<CreatedRequest, CreationError> {
        self.entered
            .lock()
            .expect("sender mutex poisoned")
            .send(())
            .expect("test is listening");
        self.release
            .lock()
            .expect("receiver mutex poisoned")
            .recv()
            .expect("test releases the creator");
        Ok(CreatedRequest {
            request_id: RequestId("slow-1".to_string()),
        })
    }
}
