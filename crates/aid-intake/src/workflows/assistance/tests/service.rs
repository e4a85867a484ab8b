use super::common::*;
use crate::workflows::assistance::domain::RequestId;
use crate::workflows::assistance::repository::{RepositoryError, RequestRepository, RequestStatus};
use crate::workflows::assistance::service::{AssistanceRequestService, AssistanceServiceError};
use crate::workflows::assistance::submission::{
    ApplicationCreator, CreationError, SubmissionCoordinator, SubmissionOutcome,
    SubmissionPayload,
};
use std::sync::Arc;

fn payload() -> SubmissionPayload {
    SubmissionPayload::from_draft(&valid_draft()).expect("draft has a category")
}

#[test]
fn submit_stores_record_and_notifies() {
    let (service, repository, notifications) = build_service();

    let record = service.submit(payload()).expect("request stored");
    assert!(record.request_id.as_str().starts_with("req-"));
    assert_eq!(record.status, RequestStatus::Submitted);

    let stored = repository
        .fetch(&record.request_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);

    let events = notifications.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "request_submitted");
    assert_eq!(events[0].request_id, record.request_id);
    assert_eq!(
        events[0].details.get("category").map(String::as_str),
        Some("emergency_assistance")
    );
}

#[test]
fn identifiers_are_unique_per_request() {
    let (service, _, _) = build_service();
    let first = service.submit(payload()).expect("first stored");
    let second = service.submit(payload()).expect("second stored");
    assert_ne!(first.request_id, second.request_id);
}

#[test]
fn notification_failure_does_not_undo_the_request() {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssistanceRequestService::new(repository.clone(), Arc::new(OfflineNotifications));

    let record = service.submit(payload()).expect("request still stored");
    assert!(repository
        .fetch(&record.request_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();
    match service.get(&RequestId("missing".to_string())) {
        Err(AssistanceServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn creator_maps_repository_failures() {
    let conflict =
        AssistanceRequestService::new(Arc::new(ConflictRepository), Arc::new(MemoryNotifications::default()));
    assert!(matches!(
        ApplicationCreator::create(&conflict, payload()),
        Err(CreationError::Rejected(_))
    ));

    let offline = AssistanceRequestService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifications::default()),
    );
    match ApplicationCreator::create(&offline, payload()) {
        Err(CreationError::Unavailable(detail)) => assert!(detail.contains("database offline")),
        other => panic!("expected unavailable, got {other:?}"),
    }
}

#[test]
fn coordinator_submits_through_the_service() {
    let (service, repository, _) = build_service();
    let coordinator = SubmissionCoordinator::new(Arc::new(service));

    let outcome = coordinator.submit(&valid_draft());
    let request_id = match outcome {
        SubmissionOutcome::Submitted(receipt) => receipt.request_id,
        other => panic!("expected submission, got {other:?}"),
    };

    let stored = repository
        .fetch(&request_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.payload.requested_amount, 2500);
    assert_eq!(stored.status_view().requested_amount, "2,500 DA");
}

#[test]
fn coordinator_reports_unavailable_service_as_submit_error() {
    let service = AssistanceRequestService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifications::default()),
    );
    let coordinator = SubmissionCoordinator::new(Arc::new(service));

    assert!(matches!(
        coordinator.submit(&valid_draft()),
        SubmissionOutcome::Failed(_)
    ));
}

#[test]
fn new_requests_surface_a_single_submitted_status() {
    let (service, _, _) = build_service();
    let record = service.submit(payload()).expect("request stored");

    let json = serde_json::to_value(&record).expect("record serializes");
    assert_eq!(json["status"], "submitted");
    assert_eq!(record.status_view().status, RequestStatus::Submitted.label());
}
