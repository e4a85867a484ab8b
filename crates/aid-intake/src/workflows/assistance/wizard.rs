use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::attachments::{AttachmentStager, RejectedAttachment};
use super::catalog::{AssistanceCategory, CategoryCatalog, UrgencyLevel};
use super::domain::{ApplicationDraft, FileCandidate, RequestId};
use super::opportunity::OpportunityContext;
use super::submission::{
    ApplicationCreator, SubmissionCoordinator, SubmissionError, SubmissionOutcome,
    SubmissionReceipt,
};
use super::validation::{ValidationEngine, ValidationErrors};

/// Ordered steps of the submission wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    Category = 1,
    Details = 2,
    Attachments = 3,
    Review = 4,
}

impl WizardStep {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::Category => "Category",
            WizardStep::Details => "Request details",
            WizardStep::Attachments => "Supporting documents",
            WizardStep::Review => "Review and submit",
        }
    }

    /// Following step, saturating at [`WizardStep::Review`].
    pub const fn next(self) -> Self {
        match self {
            WizardStep::Category => WizardStep::Details,
            WizardStep::Details => WizardStep::Attachments,
            WizardStep::Attachments | WizardStep::Review => WizardStep::Review,
        }
    }

    /// Preceding step, saturating at [`WizardStep::Category`].
    pub const fn previous(self) -> Self {
        match self {
            WizardStep::Category | WizardStep::Details => WizardStep::Category,
            WizardStep::Attachments => WizardStep::Details,
            WizardStep::Review => WizardStep::Attachments,
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = StepOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WizardStep::Category),
            2 => Ok(WizardStep::Details),
            3 => Ok(WizardStep::Attachments),
            4 => Ok(WizardStep::Review),
            other => Err(StepOutOfRange(other)),
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("wizard step {0} is outside 1..=4")]
pub struct StepOutOfRange(pub u8);

/// Request to leave the wizard, handled by the page shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Navigation {
    /// Back to the category-selection origin.
    CategorySelection,
    #[serde(rename_all = "camelCase")]
    Confirmation {
        message: String,
        request_id: RequestId,
    },
}

/// Result of entering the wizard at a given step.
#[derive(Debug)]
pub enum EntryDecision {
    Proceed(ApplicationWizard),
    Redirect(Navigation),
}

/// Step state machine over a single application draft.
#[derive(Debug, Clone)]
pub struct ApplicationWizard {
    draft: ApplicationDraft,
    step: WizardStep,
    errors: ValidationErrors,
    stager: AttachmentStager,
    rejected_attachments: Vec<RejectedAttachment>,
    submit_error: Option<SubmissionError>,
    submitted: Option<SubmissionReceipt>,
}

impl ApplicationWizard {
    /// Start a session on the first step, seeding the draft from `context` when given.
    pub fn new(context: Option<&OpportunityContext>) -> Self {
        let draft = context
            .map(OpportunityContext::seed_draft)
            .unwrap_or_default();

        Self {
            draft,
            step: WizardStep::Category,
            errors: ValidationErrors::default(),
            stager: AttachmentStager::default(),
            rejected_attachments: Vec::new(),
            submit_error: None,
            submitted: None,
        }
    }

    /// Enter the wizard at `step`. Without a category-bearing context only the
    /// first step may be entered; anything deeper redirects to category selection.
    pub fn enter(context: Option<&OpportunityContext>, step: WizardStep) -> EntryDecision {
        let has_category_context = context
            .and_then(OpportunityContext::category)
            .is_some();

        if !has_category_context && step > WizardStep::Category {
            debug!(step = step.number(), "wizard entered without category context");
            return EntryDecision::Redirect(Navigation::CategorySelection);
        }

        let mut wizard = Self::new(context);
        wizard.step = step;
        EntryDecision::Proceed(wizard)
    }

    pub fn with_stager(mut self, stager: AttachmentStager) -> Self {
        self.stager = stager;
        self
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Messages from the last blocked transition or submission precondition.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&SubmissionError> {
        self.submit_error.as_ref()
    }

    /// Candidates dropped by the most recent staging pass.
    pub fn rejected_attachments(&self) -> &[RejectedAttachment] {
        &self.rejected_attachments
    }

    pub fn submitted_request(&self) -> Option<&RequestId> {
        self.submitted.as_ref().map(|receipt| &receipt.request_id)
    }

    pub fn is_complete(&self) -> bool {
        self.submitted.is_some()
    }

    /// Live validation for the current step without attempting a transition.
    pub fn current_errors(&self) -> ValidationErrors {
        ValidationEngine::validate(self.step, &self.draft)
    }

    /// Set the category and reset the category-driven defaults. The reset runs on
    /// every call, including re-selecting the current category.
    pub fn select_category(&mut self, category: AssistanceCategory) {
        let option = CategoryCatalog::option_for(category);
        self.draft.category = Some(category);
        self.draft.urgency_level = UrgencyLevel::default_for(option);
        self.draft.requested_amount = 0;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_requested_amount(&mut self, amount: u32) {
        self.draft.requested_amount = amount;
    }

    pub fn set_urgency_level(&mut self, urgency: UrgencyLevel) {
        self.draft.urgency_level = urgency;
    }

    pub fn add_tag(&mut self, tag: &str) {
        self.draft.add_tag(tag);
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.tags.retain(|existing| existing != tag.trim());
    }

    /// Move forward when the current step validates; otherwise keep the step and
    /// return the blocking messages.
    pub fn advance(&mut self) -> Result<WizardStep, ValidationErrors> {
        let errors = ValidationEngine::validate(self.step, &self.draft);
        if !errors.is_empty() {
            debug!(step = self.step.number(), blocked = errors.len(), "advance blocked");
            self.errors = errors.clone();
            return Err(errors);
        }

        self.errors = ValidationErrors::default();
        self.step = self.step.next();
        debug!(step = self.step.number(), "advanced");
        Ok(self.step)
    }

    /// Move back one step. Never validated.
    pub fn retreat(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.errors = ValidationErrors::default();
        self.step
    }

    /// Stage candidates behind the already accepted documents and return what was
    /// dropped.
    pub fn stage_attachments(&mut self, candidates: Vec<FileCandidate>) -> &[RejectedAttachment] {
        let current = std::mem::take(&mut self.draft.documents);
        let report = self.stager.stage_with_report(candidates, current);
        self.draft.documents = report.documents;
        for rejected in &report.rejected {
            warn!(
                name = rejected.name.as_str(),
                reason = %rejected.reason.summary(),
                "attachment rejected"
            );
        }
        self.rejected_attachments = report.rejected;
        &self.rejected_attachments
    }

    pub fn remove_attachment(&mut self, index: usize) {
        let current = std::mem::take(&mut self.draft.documents);
        self.draft.documents = AttachmentStager::remove(current, index);
    }

    /// Hand the draft to `coordinator`. The step never changes here: a failure
    /// leaves the session on review with the draft intact for a retry.
    ///
    /// The current step is not checked; the coordinator's review-step validation
    /// is the only gate, so a complete draft may be submitted from any step.
    /// Once a submission succeeds the session is finished: later calls return
    /// the stored receipt and never reach the creator again.
    pub fn submit<C>(&mut self, coordinator: &SubmissionCoordinator<C>) -> SubmissionOutcome
    where
        C: ApplicationCreator + ?Sized,
    {
        if let Some(receipt) = &self.submitted {
            debug!(
                request_id = receipt.request_id.as_str(),
                "wizard already submitted"
            );
            return SubmissionOutcome::Submitted(receipt.clone());
        }

        let outcome = coordinator.submit(&self.draft);

        match &outcome {
            SubmissionOutcome::Submitted(receipt) => {
                self.errors = ValidationErrors::default();
                self.submit_error = None;
                self.submitted = Some(receipt.clone());
            }
            SubmissionOutcome::Rejected(errors) => {
                self.errors = errors.clone();
                self.submit_error = None;
            }
            SubmissionOutcome::Failed(error) => {
                self.errors = ValidationErrors::default();
                self.submit_error = Some(error.clone());
            }
            SubmissionOutcome::InFlight => {}
        }

        outcome
    }
}
