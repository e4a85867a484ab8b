//! Guided submission wizard for social-assistance requests.
//!
//! The wizard is a value: an [`ApplicationDraft`] plus the current
//! [`WizardStep`], moved forward by [`ApplicationWizard`] only when the
//! [`ValidationEngine`] reports no errors for the step. The terminal step hands
//! the draft to a [`SubmissionCoordinator`], which calls an external
//! [`ApplicationCreator`]. [`AssistanceRequestService`] is the in-process
//! creator used by the HTTP service and the CLI demo.

pub mod attachments;
pub mod catalog;
pub mod domain;
pub mod opportunity;
pub mod repository;
pub mod router;
pub mod service;
pub mod submission;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use attachments::{
    AttachmentStager, RejectedAttachment, RejectionReason, StagingReport,
    DEFAULT_MAX_ATTACHMENT_BYTES,
};
pub use catalog::{
    format_amount, AssistanceCategory, CategoryCatalog, CategoryOption, CategoryParseError,
    UrgencyLevel,
};
pub use domain::{
    ApplicationDraft, FileCandidate, ProgramRef, ProgramType, RequestId, StagedDocument,
};
pub use opportunity::{map_to_category, AnnouncementData, OpportunityContext};
pub use repository::{
    AssistanceRequestRecord, NotificationError, NotificationPublisher, RepositoryError,
    RequestNotification, RequestRepository, RequestStatus, RequestStatusView,
};
pub use router::assistance_router;
pub use service::{AssistanceRequestService, AssistanceServiceError};
pub use submission::{
    ApplicationCreator, CreatedRequest, CreationError, SubmissionCoordinator, SubmissionError,
    SubmissionOutcome, SubmissionPayload, SubmissionReceipt,
};
pub use validation::{DraftField, ValidationEngine, ValidationErrors};
pub use wizard::{ApplicationWizard, EntryDecision, Navigation, StepOutOfRange, WizardStep};
