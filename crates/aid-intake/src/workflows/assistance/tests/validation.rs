use super::common::*;
use crate::workflows::assistance::catalog::{AssistanceCategory, CategoryCatalog};
use crate::workflows::assistance::domain::ApplicationDraft;
use crate::workflows::assistance::validation::{DraftField, ValidationEngine};
use crate::workflows::assistance::wizard::WizardStep;

#[test]
fn category_step_requires_a_selection() {
    let errors = ValidationEngine::validate(WizardStep::Category, &ApplicationDraft::default());
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![DraftField::Category]);

    let errors = ValidationEngine::validate(WizardStep::Category, &valid_draft());
    assert!(errors.is_empty());
}

#[test]
fn details_step_requires_trimmed_text_and_positive_amount() {
    let mut draft = valid_draft();
    draft.title = "   ".to_string();
    draft.description = "\n\t".to_string();
    draft.requested_amount = 0;

    let errors = ValidationEngine::validate(WizardStep::Details, &draft);
    assert!(errors.contains(DraftField::Title));
    assert!(errors.contains(DraftField::Description));
    assert_eq!(
        errors.get(DraftField::RequestedAmount),
        Some("Requested amount must be greater than 0")
    );
    assert!(!errors.contains(DraftField::Category));
}

#[test]
fn amount_above_emergency_cap_names_the_cap() {
    let mut draft = valid_draft();
    draft.requested_amount = 3500;

    let errors = ValidationEngine::validate(WizardStep::Details, &draft);
    assert_eq!(errors.len(), 1);
    let message = errors
        .get(DraftField::RequestedAmount)
        .expect("amount error present");
    assert!(message.contains("3,000"), "unexpected message: {message}");
}

#[test]
fn amount_above_cap_is_rejected_for_every_category() {
    for option in CategoryCatalog::all() {
        let mut draft = valid_draft();
        draft.category = Some(option.value);
        draft.requested_amount = option.max_amount + 1;

        let errors = ValidationEngine::validate(WizardStep::Details, &draft);
        let message = errors
            .get(DraftField::RequestedAmount)
            .expect("cap error present");
        assert!(message.contains(&option.formatted_cap()));

        draft.requested_amount = option.max_amount;
        assert!(ValidationEngine::validate(WizardStep::Details, &draft).is_empty());
    }
}

#[test]
fn attachments_step_always_passes() {
    let errors = ValidationEngine::validate(WizardStep::Attachments, &ApplicationDraft::default());
    assert!(errors.is_empty());
}

#[test]
fn review_step_reruns_detail_rules() {
    let mut draft = valid_draft();
    assert!(ValidationEngine::validate(WizardStep::Review, &draft).is_empty());

    draft.description.clear();
    let errors = ValidationEngine::validate(WizardStep::Review, &draft);
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![DraftField::Description]);

    draft.category = None;
    let errors = ValidationEngine::validate(WizardStep::Review, &draft);
    assert!(errors.contains(DraftField::Category));
}

#[test]
fn validation_never_mutates_the_draft() {
    let mut draft = valid_draft();
    draft.category = Some(AssistanceCategory::FoodAssistance);
    let before = draft.clone();
    let _ = ValidationEngine::validate(WizardStep::Review, &draft);
    assert_eq!(draft, before);
}

#[test]
fn errors_serialize_keyed_by_field_name() {
    let mut draft = valid_draft();
    draft.requested_amount = 0;
    let errors = ValidationEngine::validate(WizardStep::Details, &draft);
    let json = serde_json::to_value(&errors).expect("serializes");
    assert!(json.get("requestedAmount").is_some());
}
