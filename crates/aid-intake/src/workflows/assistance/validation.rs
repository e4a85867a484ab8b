use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::CategoryCatalog;
use super::domain::ApplicationDraft;
use super::wizard::WizardStep;

/// Draft fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Category,
    Title,
    Description,
    RequestedAmount,
}

impl DraftField {
    pub const fn as_str(self) -> &'static str {
        match self {
            DraftField::Category => "category",
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::RequestedAmount => "requestedAmount",
        }
    }
}

/// Field-scoped validation messages. Empty means the step passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<DraftField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

/// Stateless per-step validator. Used both to gate transitions and to render
/// inline messages, so it never mutates the draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn validate(step: WizardStep, draft: &ApplicationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        match step {
            WizardStep::Category => check_category(draft, &mut errors),
            WizardStep::Details | WizardStep::Review => check_details(draft, &mut errors),
            WizardStep::Attachments => {}
        }

        errors
    }
}

fn check_category(draft: &ApplicationDraft, errors: &mut ValidationErrors) {
    if draft.category.is_none() {
        errors.insert(DraftField::Category, "Please select an assistance category");
    }
}

fn check_details(draft: &ApplicationDraft, errors: &mut ValidationErrors) {
    if draft.title.trim().is_empty() {
        errors.insert(DraftField::Title, "Title is required");
    }

    if draft.description.trim().is_empty() {
        errors.insert(DraftField::Description, "Description is required");
    }

    if draft.requested_amount == 0 {
        errors.insert(
            DraftField::RequestedAmount,
            "Requested amount must be greater than 0",
        );
    }

    match draft.category {
        Some(category) => {
            let option = CategoryCatalog::option_for(category);
            if draft.requested_amount > option.max_amount {
                errors.insert(
                    DraftField::RequestedAmount,
                    format!(
                        "Requested amount cannot exceed {} for {}",
                        option.formatted_cap(),
                        option.label
                    ),
                );
            }
        }
        None => check_category(draft, errors),
    }
}
