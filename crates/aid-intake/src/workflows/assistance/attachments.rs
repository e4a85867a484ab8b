use mime::Mime;
use serde::Serialize;

use super::domain::{FileCandidate, StagedDocument};

/// Default per-file ceiling (5 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Legacy spelling some clients still send for JPEG images.
const IMAGE_JPG: &str = "image/jpg";

/// Reason a candidate was left out of the staged list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    UnsupportedType { mime_type: String },
    TooLarge { byte_size: u64, limit: u64 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::UnsupportedType { mime_type } => {
                format!("file type '{mime_type}' is not accepted (JPEG, PNG or PDF only)")
            }
            RejectionReason::TooLarge { byte_size, limit } => {
                format!("file is {byte_size} bytes, above the {limit} byte limit")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedAttachment {
    pub name: String,
    #[serde(flatten)]
    pub reason: RejectionReason,
}

/// Result of a staging pass: the new document list plus anything dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagingReport {
    pub documents: Vec<StagedDocument>,
    pub rejected: Vec<RejectedAttachment>,
}

/// Type and size filter applied to candidate attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentStager {
    max_bytes: u64,
}

impl Default for AttachmentStager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTACHMENT_BYTES)
    }
}

impl AttachmentStager {
    pub fn new(max_bytes: u64) -> Self {
        let max_bytes = if max_bytes == 0 {
            DEFAULT_MAX_ATTACHMENT_BYTES
        } else {
            max_bytes
        };
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Append accepted candidates, in input order, after `current`. Rejected
    /// candidates are dropped silently; see [`Self::stage_with_report`].
    pub fn stage(
        &self,
        candidates: Vec<FileCandidate>,
        current: Vec<StagedDocument>,
    ) -> Vec<StagedDocument> {
        self.stage_with_report(candidates, current).documents
    }

    pub fn stage_with_report(
        &self,
        candidates: Vec<FileCandidate>,
        current: Vec<StagedDocument>,
    ) -> StagingReport {
        let mut report = StagingReport {
            documents: current,
            rejected: Vec::new(),
        };

        for candidate in candidates {
            match self.check(&candidate) {
                Ok(()) => report.documents.push(candidate.into()),
                Err(reason) => report.rejected.push(RejectedAttachment {
                    name: candidate.name,
                    reason,
                }),
            }
        }

        report
    }

    /// Drop the document at `index`. Out-of-range indices leave the list as is.
    pub fn remove(mut current: Vec<StagedDocument>, index: usize) -> Vec<StagedDocument> {
        if index < current.len() {
            current.remove(index);
        }
        current
    }

    fn check(&self, candidate: &FileCandidate) -> Result<(), RejectionReason> {
        if !accepts_mime_type(&candidate.mime_type) {
            return Err(RejectionReason::UnsupportedType {
                mime_type: candidate.mime_type.clone(),
            });
        }

        if candidate.byte_size > self.max_bytes {
            return Err(RejectionReason::TooLarge {
                byte_size: candidate.byte_size,
                limit: self.max_bytes,
            });
        }

        Ok(())
    }
}

/// JPEG, PNG and PDF are accepted; media-type parameters are ignored.
pub fn accepts_mime_type(raw: &str) -> bool {
    let Ok(parsed) = raw.trim().parse::<Mime>() else {
        return false;
    };
    let essence = parsed.essence_str();
    let accepted = [mime::IMAGE_JPEG, mime::IMAGE_PNG, mime::APPLICATION_PDF];

    let matches_known = accepted
        .iter()
        .any(|known| known.essence_str().eq_ignore_ascii_case(essence));
    matches_known || IMAGE_JPG.eq_ignore_ascii_case(essence)
}
