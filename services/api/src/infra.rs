use aid_intake::workflows::assistance::{
    AssistanceRequestRecord, NotificationError, NotificationPublisher, RepositoryError,
    RequestId, RequestNotification, RequestRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRequestRepository {
    records: Arc<Mutex<HashMap<RequestId, AssistanceRequestRecord>>>,
}

impl RequestRepository for InMemoryRequestRepository {
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

/// Keeps notifications in memory and mirrors them to the log.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationPublisher {
    events: Arc<Mutex<Vec<RequestNotification>>>,
}

impl NotificationPublisher for LoggingNotificationPublisher {
    fn publish(&self, notification: RequestNotification) -> Result<(), NotificationError> {
        info!(
            template = %notification.template,
            request_id = notification.request_id.as_str(),
            "notification queued"
        );
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl LoggingNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<RequestNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}
