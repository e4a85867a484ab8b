use crate::workflows::assistance::catalog::{
    format_amount, AssistanceCategory, CategoryCatalog, CategoryParseError, UrgencyLevel,
};

#[test]
fn every_category_has_exactly_one_entry() {
    for category in AssistanceCategory::ALL {
        assert_eq!(CategoryCatalog::option_for(category).value, category);
    }
    assert_eq!(CategoryCatalog::all().len(), AssistanceCategory::ALL.len());
}

#[test]
fn emergency_assistance_is_capped_and_urgent() {
    let option = CategoryCatalog::option_for(AssistanceCategory::EmergencyAssistance);
    assert_eq!(option.max_amount, 3000);
    assert!(option.urgent_by_default);
    assert_eq!(option.formatted_cap(), "3,000 DA");
    assert_eq!(UrgencyLevel::default_for(option), UrgencyLevel::Urgent);

    let food = CategoryCatalog::option_for(AssistanceCategory::FoodAssistance);
    assert_eq!(UrgencyLevel::default_for(food), UrgencyLevel::Routine);
}

#[test]
fn parsing_rejects_unknown_values() {
    assert_eq!(
        " Housing_Support ".parse::<AssistanceCategory>(),
        Ok(AssistanceCategory::HousingSupport)
    );
    assert_eq!(
        "scholarship".parse::<AssistanceCategory>(),
        Err(CategoryParseError::UnknownCategory("scholarship".to_string()))
    );
    assert_eq!("critical".parse::<UrgencyLevel>(), Ok(UrgencyLevel::Critical));
    assert!("soon".parse::<UrgencyLevel>().is_err());
}

#[test]
fn categories_serialize_as_snake_case() {
    let json = serde_json::to_string(&AssistanceCategory::ElderlyCare).expect("serializes");
    assert_eq!(json, "\"elderly_care\"");
    let urgency: UrgencyLevel = serde_json::from_str("\"important\"").expect("deserializes");
    assert_eq!(urgency, UrgencyLevel::Important);
    assert!(serde_json::from_str::<AssistanceCategory>("\"\"").is_err());
}

#[test]
fn amounts_format_with_thousands_separators() {
    assert_eq!(format_amount(0), "0 DA");
    assert_eq!(format_amount(999), "999 DA");
    assert_eq!(format_amount(1000), "1,000 DA");
    assert_eq!(format_amount(1_234_567), "1,234,567 DA");
}

#[test]
fn display_order_agrees_with_lookup() {
    for option in CategoryCatalog::all() {
        assert_eq!(CategoryCatalog::option_for(option.value), option);
    }
    let order: Vec<_> = CategoryCatalog::all().iter().map(|option| option.value).collect();
    assert_eq!(order, AssistanceCategory::ALL.to_vec());
}
