use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{AssistanceCategory, CategoryCatalog};
use super::domain::{ApplicationDraft, RequestId};
use super::opportunity::map_to_category;
use super::repository::{NotificationPublisher, RepositoryError, RequestRepository};
use super::service::{AssistanceRequestService, AssistanceServiceError};
use super::submission::SubmissionPayload;
use super::validation::{ValidationEngine, ValidationErrors};
use super::wizard::WizardStep;

/// Router exposing the creation call and the read-only wizard helpers.
pub fn assistance_router<R, N>(service: Arc<AssistanceRequestService<R, N>>) -> Router
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/assistance/requests", post(submit_handler::<R, N>))
        .route(
            "/api/v1/assistance/requests/:request_id",
            get(status_handler::<R, N>),
        )
        .route("/api/v1/assistance/categories", get(categories_handler))
        .route("/api/v1/assistance/drafts/validate", post(validate_handler))
        .route(
            "/api/v1/assistance/opportunities/category",
            post(opportunity_category_handler),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryEntry {
    value: AssistanceCategory,
    label: &'static str,
    description: &'static str,
    max_amount: u32,
    formatted_cap: String,
    urgent_by_default: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateDraftRequest {
    pub(crate) step: u8,
    pub(crate) draft: ApplicationDraft,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValidateDraftResponse {
    valid: bool,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpportunityCategoryRequest {
    #[serde(rename = "type", default)]
    pub(crate) kind: Option<String>,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<AssistanceRequestService<R, N>>>,
    Json(payload): Json<SubmissionPayload>,
) -> Response
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(payload) {
        Ok(record) => {
            let body = json!({
                "requestId": record.request_id,
                "status": record.status.label(),
                "message": "assistance request received",
            });
            (StatusCode::ACCEPTED, Json(body)).into_response()
        }
        Err(AssistanceServiceError::Repository(RepositoryError::Conflict)) => {
            let body = json!({ "error": "request already exists" });
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
        Err(other) => {
            let body = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<AssistanceRequestService<R, N>>>,
    Path(request_id): Path<String>,
) -> Response
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = RequestId(request_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(AssistanceServiceError::Repository(RepositoryError::NotFound)) => {
            let body = json!({ "requestId": id.0, "error": "request not found" });
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        Err(other) => {
            let body = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn categories_handler() -> Json<Vec<CategoryEntry>> {
    let entries = CategoryCatalog::all()
        .iter()
        .map(|option| CategoryEntry {
            value: option.value,
            label: option.label,
            description: option.description,
            max_amount: option.max_amount,
            formatted_cap: option.formatted_cap(),
            urgent_by_default: option.urgent_by_default,
        })
        .collect();
    Json(entries)
}

pub(crate) async fn validate_handler(Json(request): Json<ValidateDraftRequest>) -> Response {
    let step = match WizardStep::try_from(request.step) {
        Ok(step) => step,
        Err(error) => {
            let body = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let errors = ValidationEngine::validate(step, &request.draft);
    let body = ValidateDraftResponse {
        valid: errors.is_empty(),
        errors,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn opportunity_category_handler(
    Json(request): Json<OpportunityCategoryRequest>,
) -> Json<serde_json::Value> {
    let category = map_to_category(request.kind.as_deref());
    let option = CategoryCatalog::option_for(category);
    Json(json!({
        "category": category,
        "label": option.label,
        "maxAmount": option.max_amount,
    }))
}
