use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::{AssistanceCategory, UrgencyLevel};
use super::domain::{ApplicationDraft, ProgramRef, RequestId, StagedDocument};
use super::validation::{ValidationEngine, ValidationErrors};
use super::wizard::{Navigation, WizardStep};

const SUBMITTED_MESSAGE: &str = "Your assistance request was submitted successfully.";
const SUBMIT_FAILED_MESSAGE: &str = "We could not submit your request. Please try again.";

/// Body of the creation call. Staged documents are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub title: String,
    pub description: String,
    pub requested_amount: u32,
    pub category: AssistanceCategory,
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub program: Option<ProgramRef>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SubmissionPayload {
    /// `None` while the draft has no category.
    pub fn from_draft(draft: &ApplicationDraft) -> Option<Self> {
        Some(Self {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            requested_amount: draft.requested_amount,
            category: draft.category?,
            urgency_level: draft.urgency_level,
            program: draft.program.clone(),
            tags: draft.tags.clone(),
        })
    }
}

/// Response of the creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequest {
    pub request_id: RequestId,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreationError {
    #[error("request rejected by creation service: {0}")]
    Rejected(String),
    #[error("creation service unavailable: {0}")]
    Unavailable(String),
}

/// External collaborator that turns a payload into a stored request.
pub trait ApplicationCreator: Send + Sync {
    fn create(&self, payload: SubmissionPayload) -> Result<CreatedRequest, CreationError>;
}

/// Single top-level message reported after a failed creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionError {
    pub submit: String,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.submit)
    }
}

/// Data the page shell needs after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub request_id: RequestId,
    pub navigation: Navigation,
    /// Staged documents still waiting for an upload step.
    pub pending_documents: Vec<StagedDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted(SubmissionReceipt),
    /// Review-step validation failed; no call was made.
    Rejected(ValidationErrors),
    Failed(SubmissionError),
    /// Another submission is still pending; no call was made.
    InFlight,
}

impl SubmissionOutcome {
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            SubmissionOutcome::Submitted(receipt) => Some(&receipt.request_id),
            _ => None,
        }
    }
}

/// Final gate in front of the creation collaborator.
pub struct SubmissionCoordinator<C: ?Sized> {
    creator: Arc<C>,
    in_flight: AtomicBool,
}

impl<C> SubmissionCoordinator<C>
where
    C: ApplicationCreator + ?Sized,
{
    pub fn new(creator: Arc<C>) -> Self {
        Self {
            creator,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn submit(&self, draft: &ApplicationDraft) -> SubmissionOutcome {
        let Some(_flight) = InFlightGuard::acquire(&self.in_flight) else {
            return SubmissionOutcome::InFlight;
        };

        let errors = ValidationEngine::validate(WizardStep::Review, draft);
        let payload = match SubmissionPayload::from_draft(draft) {
            Some(payload) if errors.is_empty() => payload,
            _ => return SubmissionOutcome::Rejected(errors),
        };

        match self.creator.create(payload) {
            Ok(created) => {
                info!(request_id = created.request_id.as_str(), "assistance request submitted");
                SubmissionOutcome::Submitted(SubmissionReceipt {
                    navigation: Navigation::Confirmation {
                        message: SUBMITTED_MESSAGE.to_string(),
                        request_id: created.request_id.clone(),
                    },
                    request_id: created.request_id,
                    pending_documents: draft.documents.clone(),
                })
            }
            Err(error) => {
                warn!(%error, "assistance request submission failed");
                SubmissionOutcome::Failed(SubmissionError {
                    submit: SUBMIT_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }
}

/// Holds the in-flight flag for the lifetime of one submission attempt.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
