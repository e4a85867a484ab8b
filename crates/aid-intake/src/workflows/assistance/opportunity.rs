use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::catalog::{AssistanceCategory, CategoryCatalog, UrgencyLevel};
use super::domain::{ApplicationDraft, ProgramRef, ProgramType};

const OPPORTUNITY_CATEGORIES: [(&str, AssistanceCategory); 9] = [
    ("scholarship", AssistanceCategory::EducationalSupport),
    ("training", AssistanceCategory::EducationalSupport),
    ("job_opportunity", AssistanceCategory::EmploymentSupport),
    ("housing_assistance", AssistanceCategory::HousingSupport),
    ("medical_aid", AssistanceCategory::MedicalAssistance),
    ("emergency_relief", AssistanceCategory::EmergencyAssistance),
    ("food_aid", AssistanceCategory::FoodAssistance),
    ("elderly_support", AssistanceCategory::ElderlyCare),
    ("disability_aid", AssistanceCategory::DisabilitySupport),
];

/// Map an external opportunity type onto a category. Never fails; unknown or
/// absent input resolves to [`AssistanceCategory::Other`].
pub fn map_to_category(opportunity_type: Option<&str>) -> AssistanceCategory {
    let Some(raw) = opportunity_type else {
        return AssistanceCategory::Other;
    };
    let normalized = raw.trim().to_ascii_lowercase();

    OPPORTUNITY_CATEGORIES
        .iter()
        .find(|(kind, _)| *kind == normalized)
        .map(|(_, category)| *category)
        .unwrap_or(AssistanceCategory::Other)
}

/// Announcement details forwarded by the navigation origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: Option<f64>,
}

/// Optional context handed to the wizard once, at construction.
///
/// `max_amount` and `announcement_data.budget` are informational; the catalog
/// cap stays authoritative for validation. Informational fields in an
/// unexpected shape read as `None` instead of rejecting the context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityContext {
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub program_type: Option<ProgramType>,
    #[serde(default)]
    pub program_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub announcement_data: Option<AnnouncementData>,
}

impl OpportunityContext {
    /// Raw opportunity type, preferring the explicit service category.
    pub fn opportunity_type(&self) -> Option<&str> {
        self.service_category
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| {
                self.announcement_data
                    .as_ref()
                    .map(|announcement| announcement.kind.as_str())
                    .filter(|value| !value.trim().is_empty())
            })
    }

    /// Category inferred from the context, or `None` when the context names no
    /// opportunity type at all.
    pub fn category(&self) -> Option<AssistanceCategory> {
        let raw = self.opportunity_type()?;
        Some(
            raw.parse::<AssistanceCategory>()
                .unwrap_or_else(|_| map_to_category(Some(raw))),
        )
    }

    pub fn program(&self) -> Option<ProgramRef> {
        let id = self.program_id.as_ref()?.trim();
        if id.is_empty() {
            return None;
        }

        let kind = self.program_type.unwrap_or(if self.announcement_data.is_some() {
            ProgramType::Announcement
        } else {
            ProgramType::Content
        });

        Some(ProgramRef {
            kind,
            id: id.to_string(),
        })
    }

    /// Announcement title, else the service name; blank values are skipped.
    pub fn title(&self) -> Option<&str> {
        self.announcement_data
            .as_ref()
            .and_then(|announcement| non_blank(&announcement.title))
            .or_else(|| self.service_name.as_deref().and_then(non_blank))
    }

    /// Build the initial draft for a wizard session entered from this context.
    pub fn seed_draft(&self) -> ApplicationDraft {
        let mut draft = ApplicationDraft {
            program: self.program(),
            title: self.title().unwrap_or_default().to_string(),
            ..ApplicationDraft::default()
        };

        if let Some(category) = self.category() {
            let option = CategoryCatalog::option_for(category);
            draft.category = Some(category);
            draft.urgency_level = UrgencyLevel::default_for(option);
            draft.requested_amount = 0;
        }

        if let Some(kind) = self.opportunity_type() {
            draft.add_tag(kind);
        }
        if let Some(name) = self.service_name.as_deref() {
            draft.add_tag(name);
        }

        draft
    }
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|trimmed| !trimmed.is_empty())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_deadline))
}

fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Accepts JSON numbers and numeric strings; anything else is `None`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(amount.filter(|value| value.is_finite()))
}
