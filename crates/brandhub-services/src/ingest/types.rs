//! Types owned by the ingestion pipeline.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandhub_core::classify::AssetCategory;

/// A raw file entering the pipeline: original name, MIME type, and bytes.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Naming/resolution status of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Valid,
    Warning,
    Error,
}

/// Upload lifecycle of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Failed,
}

/// AI-analysis side branch of a candidate. Analysis never blocks upload
/// eligibility and can be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    Complete,
    Failed,
}

/// One in-flight upload item tracked by the pipeline.
///
/// Created when a file enters the drop zone, mutated by every pipeline
/// stage, removed on user removal or on a fully successful commit.
/// Whenever `gym_id` is `None`, `is_admin_resource` is true.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// Session-unique id (sanitized name + timestamp + random fragment).
    pub id: String,
    pub file: IncomingFile,
    pub gym_code: String,
    pub gym_id: Option<Uuid>,
    pub gym_name: Option<String>,
    pub is_admin_resource: bool,
    /// Asset type token from the parsed name (`logo`, `hero`, ...).
    pub asset_type: String,
    pub descriptor: String,
    pub variant: u32,
    pub category: AssetCategory,
    pub status: CandidateStatus,
    pub status_message: Option<String>,
    pub upload_status: UploadStatus,
    /// Collaborator error message when `upload_status` is `Failed`.
    pub upload_message: Option<String>,
    /// Public URL once the asset is committed.
    pub url: Option<String>,
    pub analysis: AnalysisStatus,
    pub edited_filename: Option<String>,
    pub ai_suggested_filename: Option<String>,
}

impl UploadCandidate {
    /// The name the asset will be committed under: the latest rename if any,
    /// otherwise the original filename.
    pub fn current_filename(&self) -> &str {
        self.edited_filename.as_deref().unwrap_or(&self.file.name)
    }

    /// Whether `commit` will attempt this candidate.
    pub fn is_uploadable(&self) -> bool {
        self.status != CandidateStatus::Error
            && matches!(
                self.upload_status,
                UploadStatus::Pending | UploadStatus::Failed
            )
    }
}

/// Closed set of candidate filter predicates.
///
/// Replaces ad-hoc filter callbacks with a tagged union so filtering logic
/// is enumerable and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    All,
    Gym(Uuid),
    AdminOnly,
    Category(AssetCategory),
    Status(CandidateStatus),
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &UploadCandidate) -> bool {
        match self {
            CandidateFilter::All => true,
            CandidateFilter::Gym(id) => candidate.gym_id == Some(*id),
            CandidateFilter::AdminOnly => candidate.is_admin_resource,
            CandidateFilter::Category(category) => candidate.category == *category,
            CandidateFilter::Status(status) => candidate.status == *status,
        }
    }
}

/// Aggregate outcome of a commit pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReport {
    pub uploaded: usize,
    pub failed: usize,
}

impl CommitReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Aggregate outcome of a batch AI-analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub suggested: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(gym_id: Option<Uuid>, category: AssetCategory) -> UploadCandidate {
        UploadCandidate {
            id: "c1".to_string(),
            file: IncomingFile {
                name: "x.png".to_string(),
                content_type: "image/png".to_string(),
                data: Bytes::new(),
            },
            gym_code: String::new(),
            gym_id,
            gym_name: None,
            is_admin_resource: gym_id.is_none(),
            asset_type: String::new(),
            descriptor: String::new(),
            variant: 1,
            category,
            status: CandidateStatus::Valid,
            status_message: None,
            upload_status: UploadStatus::Pending,
            upload_message: None,
            url: None,
            analysis: AnalysisStatus::Idle,
            edited_filename: None,
            ai_suggested_filename: None,
        }
    }

    #[test]
    fn filter_predicates() {
        let gym = Uuid::new_v4();
        let scoped = candidate(Some(gym), AssetCategory::Image);
        let admin = candidate(None, AssetCategory::Video);

        assert!(CandidateFilter::All.matches(&scoped));
        assert!(CandidateFilter::Gym(gym).matches(&scoped));
        assert!(!CandidateFilter::Gym(gym).matches(&admin));
        assert!(CandidateFilter::AdminOnly.matches(&admin));
        assert!(!CandidateFilter::AdminOnly.matches(&scoped));
        assert!(CandidateFilter::Category(AssetCategory::Video).matches(&admin));
        assert!(CandidateFilter::Status(CandidateStatus::Valid).matches(&scoped));
    }

    #[test]
    fn current_filename_prefers_edit() {
        let mut c = candidate(None, AssetCategory::Image);
        assert_eq!(c.current_filename(), "x.png");
        c.edited_filename = Some("renamed.png".to_string());
        assert_eq!(c.current_filename(), "renamed.png");
    }

    #[test]
    fn uploadable_excludes_error_and_success() {
        let mut c = candidate(None, AssetCategory::Image);
        assert!(c.is_uploadable());
        c.upload_status = UploadStatus::Success;
        assert!(!c.is_uploadable());
        c.upload_status = UploadStatus::Failed;
        assert!(c.is_uploadable());
        c.status = CandidateStatus::Error;
        assert!(!c.is_uploadable());
    }
}
