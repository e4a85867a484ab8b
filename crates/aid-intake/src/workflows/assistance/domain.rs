use serde::{Deserialize, Serialize};

use super::catalog::{AssistanceCategory, UrgencyLevel};

/// Identifier assigned by the creation collaborator to an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kind of offering an application targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramType {
    Content,
    Announcement,
}

/// Offering an application targets; absent for a generic request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRef {
    #[serde(rename = "type")]
    pub kind: ProgramType,
    pub id: String,
}

/// File the applicant picked, described by metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCandidate {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, byte_size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            byte_size,
            mime_type: mime_type.into(),
        }
    }
}

/// A candidate that passed the attachment filter and awaits upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedDocument {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
}

impl From<FileCandidate> for StagedDocument {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            byte_size: candidate.byte_size,
            mime_type: candidate.mime_type,
        }
    }
}

/// In-progress application held by a wizard session.
///
/// `category` is unset only until the applicant completes the selection step
/// (or an opportunity context seeds it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub title: String,
    pub description: String,
    pub requested_amount: u32,
    pub category: Option<AssistanceCategory>,
    pub urgency_level: UrgencyLevel,
    pub program: Option<ProgramRef>,
    pub documents: Vec<StagedDocument>,
    pub tags: Vec<String>,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            requested_amount: 0,
            category: None,
            urgency_level: UrgencyLevel::Routine,
            program: None,
            documents: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl ApplicationDraft {
    /// Add a tag unless an equal (trimmed) tag is already present.
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return;
        }
        self.tags.push(tag.to_string());
    }
}
