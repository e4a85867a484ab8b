use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Monetary unit label used when rendering amount caps.
pub const CURRENCY_LABEL: &str = "DA";

/// Fixed assistance categories an applicant can request support under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistanceCategory {
    EmergencyAssistance,
    EducationalSupport,
    MedicalAssistance,
    HousingSupport,
    FoodAssistance,
    EmploymentSupport,
    ElderlyCare,
    DisabilitySupport,
    Other,
}

impl AssistanceCategory {
    pub const ALL: [AssistanceCategory; 9] = [
        AssistanceCategory::EmergencyAssistance,
        AssistanceCategory::EducationalSupport,
        AssistanceCategory::MedicalAssistance,
        AssistanceCategory::HousingSupport,
        AssistanceCategory::FoodAssistance,
        AssistanceCategory::EmploymentSupport,
        AssistanceCategory::ElderlyCare,
        AssistanceCategory::DisabilitySupport,
        AssistanceCategory::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AssistanceCategory::EmergencyAssistance => "emergency_assistance",
            AssistanceCategory::EducationalSupport => "educational_support",
            AssistanceCategory::MedicalAssistance => "medical_assistance",
            AssistanceCategory::HousingSupport => "housing_support",
            AssistanceCategory::FoodAssistance => "food_assistance",
            AssistanceCategory::EmploymentSupport => "employment_support",
            AssistanceCategory::ElderlyCare => "elderly_care",
            AssistanceCategory::DisabilitySupport => "disability_support",
            AssistanceCategory::Other => "other",
        }
    }
}

impl fmt::Display for AssistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistanceCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        AssistanceCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| CategoryParseError::UnknownCategory(value.to_string()))
    }
}

/// How pressing a request is; seeded from the category and editable afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Routine,
    Important,
    Urgent,
    Critical,
}

impl UrgencyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            UrgencyLevel::Routine => "routine",
            UrgencyLevel::Important => "important",
            UrgencyLevel::Urgent => "urgent",
            UrgencyLevel::Critical => "critical",
        }
    }

    /// Default urgency applied whenever a category is selected.
    pub const fn default_for(option: &CategoryOption) -> Self {
        if option.urgent_by_default {
            UrgencyLevel::Urgent
        } else {
            UrgencyLevel::Routine
        }
    }
}

impl FromStr for UrgencyLevel {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "routine" => Ok(UrgencyLevel::Routine),
            "important" => Ok(UrgencyLevel::Important),
            "urgent" => Ok(UrgencyLevel::Urgent),
            "critical" => Ok(UrgencyLevel::Critical),
            _ => Err(CategoryParseError::UnknownUrgency(value.to_string())),
        }
    }
}

/// Raised when a category or urgency string falls outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryParseError {
    #[error("unknown assistance category '{0}'")]
    UnknownCategory(String),
    #[error("unknown urgency level '{0}'")]
    UnknownUrgency(String),
}

/// Business rules attached to a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub value: AssistanceCategory,
    pub label: &'static str,
    pub description: &'static str,
    pub max_amount: u32,
    pub urgent_by_default: bool,
}

impl CategoryOption {
    pub fn formatted_cap(&self) -> String {
        format_amount(self.max_amount)
    }
}

const EMERGENCY: CategoryOption = CategoryOption {
    value: AssistanceCategory::EmergencyAssistance,
    label: "Emergency Assistance",
    description: "Immediate help after an unexpected crisis such as a fire, flood, or sudden loss of income",
    max_amount: 3000,
    urgent_by_default: true,
};

const EDUCATIONAL: CategoryOption = CategoryOption {
    value: AssistanceCategory::EducationalSupport,
    label: "Educational Support",
    description: "School fees, supplies, and training costs",
    max_amount: 2000,
    urgent_by_default: false,
};

const MEDICAL: CategoryOption = CategoryOption {
    value: AssistanceCategory::MedicalAssistance,
    label: "Medical Assistance",
    description: "Treatment, medication, and medical equipment",
    max_amount: 5000,
    urgent_by_default: true,
};

const HOUSING: CategoryOption = CategoryOption {
    value: AssistanceCategory::HousingSupport,
    label: "Housing Support",
    description: "Rent arrears, repairs, and essential utilities",
    max_amount: 4000,
    urgent_by_default: false,
};

const FOOD: CategoryOption = CategoryOption {
    value: AssistanceCategory::FoodAssistance,
    label: "Food Assistance",
    description: "Groceries and basic household nutrition",
    max_amount: 1000,
    urgent_by_default: false,
};

const EMPLOYMENT: CategoryOption = CategoryOption {
    value: AssistanceCategory::EmploymentSupport,
    label: "Employment Support",
    description: "Job search, certification, and starting-work expenses",
    max_amount: 2500,
    urgent_by_default: false,
};

const ELDERLY: CategoryOption = CategoryOption {
    value: AssistanceCategory::ElderlyCare,
    label: "Elderly Care",
    description: "Home care and daily living support for older adults",
    max_amount: 3000,
    urgent_by_default: false,
};

const DISABILITY: CategoryOption = CategoryOption {
    value: AssistanceCategory::DisabilitySupport,
    label: "Disability Support",
    description: "Mobility aids, accessibility adaptations, and care services",
    max_amount: 3500,
    urgent_by_default: false,
};

const OTHER: CategoryOption = CategoryOption {
    value: AssistanceCategory::Other,
    label: "Other Assistance",
    description: "Needs that do not fit the categories above",
    max_amount: 1500,
    urgent_by_default: false,
};

const CATEGORY_OPTIONS: [CategoryOption; 9] = [
    EMERGENCY,
    EDUCATIONAL,
    MEDICAL,
    HOUSING,
    FOOD,
    EMPLOYMENT,
    ELDERLY,
    DISABILITY,
    OTHER,
];

/// Process-wide, immutable table of category rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCatalog;

impl CategoryCatalog {
    /// Rules for `category`. Total: every enum value has exactly one entry.
    pub fn option_for(category: AssistanceCategory) -> &'static CategoryOption {
        match category {
            AssistanceCategory::EmergencyAssistance => &EMERGENCY,
            AssistanceCategory::EducationalSupport => &EDUCATIONAL,
            AssistanceCategory::MedicalAssistance => &MEDICAL,
            AssistanceCategory::HousingSupport => &HOUSING,
            AssistanceCategory::FoodAssistance => &FOOD,
            AssistanceCategory::EmploymentSupport => &EMPLOYMENT,
            AssistanceCategory::ElderlyCare => &ELDERLY,
            AssistanceCategory::DisabilitySupport => &DISABILITY,
            AssistanceCategory::Other => &OTHER,
        }
    }

    /// Entries in display order.
    pub fn all() -> &'static [CategoryOption] {
        &CATEGORY_OPTIONS
    }
}

/// Render an amount with thousands separators and the currency label, e.g. `3,000 DA`.
pub fn format_amount(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped} {CURRENCY_LABEL}")
}
