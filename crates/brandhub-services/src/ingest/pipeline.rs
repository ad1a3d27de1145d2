//! Ingestion pipeline controller.
//!
//! Owns the in-memory candidate list and orchestrates the per-file
//! parse → resolve → classify chain plus the asynchronous commit and
//! AI-analysis passes. All collaborator failures are converted to in-band
//! candidate state; `commit` and `analyze_all` never abort on a single
//! item.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use brandhub_core::catalog::AssetCatalog;
use brandhub_core::classify::{classify_category, classify_target, AssetCategory, TargetStore};
use brandhub_core::models::{GymRecord, NewGymElement, NewGymLogo};
use brandhub_core::naming::{self, ParsedFilename};
use brandhub_core::resolve::resolve_gym_code;
use brandhub_core::{validation, AppConfig, AppError};
use brandhub_storage::{generate_asset_key, Storage};

use crate::captioning::{CaptionContext, Captioner};

use super::types::{
    AnalysisReport, AnalysisStatus, CandidateFilter, CandidateStatus, CommitReport, IncomingFile,
    UploadCandidate, UploadStatus,
};

/// Which ingestion flow the pipeline runs.
///
/// The two flows differ in how an unmatched gym is handled and must stay
/// distinct:
///
/// - `Campaign`: permissive decoding (bare gym-code prefixes accepted); a
///   file with no gym match degrades to a warning and lands in the
///   unassigned/admin bucket. Nothing is rejected outright.
/// - `Bulk`: strict grammar only; a structurally malformed name is an
///   error that blocks commit, and an unknown gym code is a warning
///   requiring correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestFlow {
    Campaign,
    Bulk,
}

/// Upload limits applied when files enter the pipeline.
#[derive(Debug, Clone)]
pub struct IngestLimits {
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl IngestLimits {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            allowed_content_types: config.allowed_content_types.clone(),
        }
    }
}

/// Derived fields produced by the parse → resolve chain for one filename.
struct DerivedName {
    parsed: ParsedFilename,
    gym: Option<GymRecord>,
    status: CandidateStatus,
    message: Option<String>,
}

/// Ingestion pipeline controller.
///
/// The candidate list is owned here, not in UI state, so the pipeline can
/// be driven and tested without a presentation layer. The gym registry is
/// a snapshot taken at construction; it is not refreshed mid-pipeline.
pub struct IngestPipeline {
    flow: IngestFlow,
    gyms: Vec<GymRecord>,
    storage: Arc<dyn Storage>,
    catalog: Arc<dyn AssetCatalog>,
    captioner: Option<Arc<dyn Captioner>>,
    limits: Option<IngestLimits>,
    candidates: Vec<UploadCandidate>,
    uploading: bool,
}

impl IngestPipeline {
    pub fn new(
        flow: IngestFlow,
        gyms: Vec<GymRecord>,
        storage: Arc<dyn Storage>,
        catalog: Arc<dyn AssetCatalog>,
    ) -> Self {
        Self {
            flow,
            gyms,
            storage,
            catalog,
            captioner: None,
            limits: None,
            candidates: Vec::new(),
            uploading: false,
        }
    }

    pub fn with_captioner(mut self, captioner: Arc<dyn Captioner>) -> Self {
        self.captioner = Some(captioner);
        self
    }

    pub fn with_limits(mut self, limits: IngestLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn flow(&self) -> IngestFlow {
        self.flow
    }

    pub fn candidates(&self) -> &[UploadCandidate] {
        &self.candidates
    }

    /// Candidates matching the given predicate.
    pub fn filtered(&self, filter: &CandidateFilter) -> Vec<&UploadCandidate> {
        self.candidates
            .iter()
            .filter(|c| filter.matches(c))
            .collect()
    }

    /// Replace the registry snapshot between batches.
    pub fn set_gyms(&mut self, gyms: Vec<GymRecord>) -> Result<(), AppError> {
        self.ensure_not_uploading()?;
        self.gyms = gyms;
        Ok(())
    }

    /// Run the parse → resolve → classify chain for each file and append
    /// the resulting candidates. Existing candidates are kept.
    pub fn ingest(&mut self, files: Vec<IncomingFile>) -> Result<(), AppError> {
        self.ensure_not_uploading()?;

        for file in files {
            let derived = self.derive(&file.name);
            let id = Self::generate_candidate_id(&file.name);
            let category = classify_category(&file.content_type);

            let mut candidate = UploadCandidate {
                id,
                file,
                gym_code: String::new(),
                gym_id: None,
                gym_name: None,
                is_admin_resource: true,
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
            };
            Self::apply_derived(&mut candidate, derived);

            if let Some(ref limits) = self.limits {
                let check = validation::validate_file_size(
                    candidate.file.data.len(),
                    limits.max_file_size_bytes,
                )
                .and_then(|_| {
                    validation::validate_content_type(
                        &candidate.file.content_type,
                        &limits.allowed_content_types,
                    )
                });
                if let Err(err) = check {
                    candidate.status = CandidateStatus::Error;
                    candidate.status_message = Some(err.to_string());
                }
            }

            tracing::debug!(
                candidate = %candidate.id,
                filename = %candidate.file.name,
                status = ?candidate.status,
                gym = ?candidate.gym_code,
                "File ingested"
            );

            self.candidates.push(candidate);
        }

        Ok(())
    }

    /// Re-run the parse → resolve → classify chain against a new name and
    /// replace the candidate's derived fields. The file bytes are
    /// untouched.
    pub fn rename(&mut self, candidate_id: &str, new_name: &str) -> Result<(), AppError> {
        self.ensure_not_uploading()?;

        let derived = self.derive(new_name);
        let candidate = self.candidate_mut(candidate_id)?;
        candidate.edited_filename = Some(new_name.to_string());
        Self::apply_derived(candidate, derived);

        Ok(())
    }

    /// Ask the captioning provider for a better filename, then apply it as
    /// a rename. Only valid for image candidates. A provider failure
    /// leaves the candidate's name and status untouched.
    pub async fn request_ai_suggestion(&mut self, candidate_id: &str) -> Result<(), AppError> {
        self.ensure_not_uploading()?;

        let captioner = self.captioner.clone().ok_or_else(|| {
            AppError::Captioning("No captioning provider configured".to_string())
        })?;

        let (image, context, extension) = {
            let candidate = self.candidate(candidate_id)?;
            if candidate.category != AssetCategory::Image {
                return Err(AppError::InvalidInput(format!(
                    "AI suggestions are only available for images, got '{}'",
                    candidate.file.content_type
                )));
            }
            (
                candidate.file.data.clone(),
                CaptionContext {
                    gym_code: candidate.gym_code.clone(),
                    gym_name: candidate.gym_name.clone(),
                    current_filename: candidate.current_filename().to_string(),
                },
                naming::file_extension(candidate.current_filename()),
            )
        };

        self.candidate_mut(candidate_id)?.analysis = AnalysisStatus::Analyzing;

        match captioner.suggest_filename(image, &context).await {
            Ok(suggestion) => {
                let mut name = naming::sanitize(&suggestion.suggested_name);
                if name.is_empty() {
                    self.candidate_mut(candidate_id)?.analysis = AnalysisStatus::Failed;
                    return Err(AppError::Captioning(
                        "Captioning service returned an unusable name".to_string(),
                    ));
                }
                if naming::file_extension(&name).is_empty() && !extension.is_empty() {
                    name = format!("{}.{}", name.trim_end_matches('.'), extension);
                }

                let derived = self.derive(&name);
                let candidate = self.candidate_mut(candidate_id)?;
                candidate.ai_suggested_filename = Some(name.clone());
                candidate.edited_filename = Some(name);
                Self::apply_derived(candidate, derived);
                candidate.analysis = AnalysisStatus::Complete;

                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    candidate = %candidate_id,
                    error = %err,
                    "Captioning failed; keeping current name"
                );
                self.candidate_mut(candidate_id)?.analysis = AnalysisStatus::Failed;
                Err(AppError::Captioning(err.to_string()))
            }
        }
    }

    /// Request AI suggestions for every image candidate, sequentially.
    /// Per-item failures are counted, never propagated.
    pub async fn analyze_all(&mut self) -> Result<AnalysisReport, AppError> {
        self.ensure_not_uploading()?;
        if self.captioner.is_none() {
            return Err(AppError::Captioning(
                "No captioning provider configured".to_string(),
            ));
        }

        let ids: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| {
                c.category == AssetCategory::Image && c.upload_status != UploadStatus::Success
            })
            .map(|c| c.id.clone())
            .collect();

        let mut report = AnalysisReport {
            suggested: 0,
            failed: 0,
        };

        for id in ids {
            match self.request_ai_suggestion(&id).await {
                Ok(()) => report.suggested += 1,
                Err(_) => report.failed += 1,
            }
        }

        tracing::info!(
            suggested = report.suggested,
            failed = report.failed,
            "Batch analysis finished"
        );

        Ok(report)
    }

    /// Upload every uploadable candidate sequentially: storage put under a
    /// generated key, then a metadata insert routed by asset type.
    ///
    /// Each candidate's `upload_status` transitions independently; one
    /// failure never blocks the remaining candidates. The list is cleared
    /// only when every candidate ends up `Success`; otherwise mixed
    /// outcomes stay visible for retry.
    pub async fn commit(&mut self) -> Result<CommitReport, AppError> {
        self.ensure_not_uploading()?;
        self.uploading = true;

        let mut report = CommitReport {
            uploaded: 0,
            failed: 0,
        };

        for idx in 0..self.candidates.len() {
            if !self.candidates[idx].is_uploadable() {
                continue;
            }

            let (id, filename, content_type, data, gym_id, asset_type, category, variant) = {
                let c = &self.candidates[idx];
                (
                    c.id.clone(),
                    c.current_filename().to_string(),
                    c.file.content_type.clone(),
                    c.file.data.clone(),
                    c.gym_id,
                    c.asset_type.clone(),
                    c.category,
                    c.variant,
                )
            };

            self.candidates[idx].upload_status = UploadStatus::Uploading;
            let key = generate_asset_key(gym_id, &filename);

            let url = match self.storage.put(&key, &content_type, data.clone()).await {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(candidate = %id, key = %key, error = %err, "Storage upload failed");
                    let candidate = &mut self.candidates[idx];
                    candidate.upload_status = UploadStatus::Failed;
                    candidate.upload_message = Some(err.to_string());
                    report.failed += 1;
                    continue;
                }
            };

            let file_size = data.len() as i64;
            let insert_result = match classify_target(&asset_type) {
                TargetStore::Logo => {
                    self.catalog
                        .insert_logo(NewGymLogo {
                            gym_id,
                            filename: filename.clone(),
                            storage_key: key.clone(),
                            url: url.clone(),
                            content_type: content_type.clone(),
                            file_size,
                            category,
                            variant: variant as i32,
                        })
                        .await
                }
                TargetStore::Element => {
                    self.catalog
                        .insert_element(NewGymElement {
                            gym_id,
                            filename: filename.clone(),
                            storage_key: key.clone(),
                            url: url.clone(),
                            content_type: content_type.clone(),
                            file_size,
                            category,
                            asset_type: asset_type.clone(),
                        })
                        .await
                }
            };

            match insert_result {
                Ok(record_id) => {
                    let candidate = &mut self.candidates[idx];
                    candidate.upload_status = UploadStatus::Success;
                    candidate.url = Some(url);
                    report.uploaded += 1;
                    tracing::info!(
                        candidate = %id,
                        record = %record_id,
                        key = %key,
                        "Asset committed"
                    );
                }
                Err(err) => {
                    tracing::warn!(candidate = %id, error = %err, "Metadata insert failed");
                    if let Err(cleanup_err) = self.storage.delete(&key).await {
                        tracing::warn!(
                            key = %key,
                            error = %cleanup_err,
                            "Failed to remove orphaned object after insert failure"
                        );
                    }
                    let candidate = &mut self.candidates[idx];
                    candidate.upload_status = UploadStatus::Failed;
                    candidate.upload_message = Some(err.to_string());
                    report.failed += 1;
                }
            }
        }

        self.uploading = false;

        if self
            .candidates
            .iter()
            .all(|c| c.upload_status == UploadStatus::Success)
        {
            self.candidates.clear();
        }

        tracing::info!(
            uploaded = report.uploaded,
            failed = report.failed,
            "Commit batch finished"
        );

        Ok(report)
    }

    /// Remove a candidate before commit.
    pub fn remove(&mut self, candidate_id: &str) -> Result<(), AppError> {
        self.ensure_not_uploading()?;
        let idx = self
            .candidates
            .iter()
            .position(|c| c.id == candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate not found: {}", candidate_id)))?;
        self.candidates.remove(idx);
        Ok(())
    }

    /// Drop every candidate.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.ensure_not_uploading()?;
        self.candidates.clear();
        Ok(())
    }

    /// Editing and list mutation are disabled while a commit batch is in
    /// flight; in-flight uploads cannot be cancelled.
    fn ensure_not_uploading(&self) -> Result<(), AppError> {
        if self.uploading {
            return Err(AppError::InvalidInput(
                "Upload in progress; editing is disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn candidate(&self, candidate_id: &str) -> Result<&UploadCandidate, AppError> {
        self.candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate not found: {}", candidate_id)))
    }

    fn candidate_mut(&mut self, candidate_id: &str) -> Result<&mut UploadCandidate, AppError> {
        self.candidates
            .iter_mut()
            .find(|c| c.id == candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate not found: {}", candidate_id)))
    }

    /// Session-unique candidate id: sanitized name + timestamp + random
    /// fragment, so identical filenames dropped twice never collide.
    fn generate_candidate_id(filename: &str) -> String {
        let fragment = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}",
            naming::sanitize(filename),
            Utc::now().timestamp_millis(),
            &fragment[..8]
        )
    }

    /// Run parse → resolve for one filename under the current flow.
    fn derive(&self, filename: &str) -> DerivedName {
        let parsed = match self.flow {
            IngestFlow::Bulk => naming::decode(filename),
            IngestFlow::Campaign => {
                let known_codes: Vec<String> =
                    self.gyms.iter().map(|g| g.code.clone()).collect();
                naming::decode_with_gym_codes(filename, &known_codes)
            }
        };

        let gym = resolve_gym_code(&parsed.gym_code, &self.gyms).cloned();

        let (status, message) = match self.flow {
            IngestFlow::Bulk => {
                if !parsed.is_valid {
                    (
                        CandidateStatus::Error,
                        Some(format!(
                            "Filename '{}' does not match GYMCODE-type-descriptor-vN.ext",
                            filename
                        )),
                    )
                } else if gym.is_none() {
                    (
                        CandidateStatus::Warning,
                        Some(format!(
                            "Unknown gym code '{}'; correct the filename before committing",
                            parsed.gym_code
                        )),
                    )
                } else {
                    (CandidateStatus::Valid, None)
                }
            }
            IngestFlow::Campaign => match (&gym, parsed.is_valid) {
                (Some(_), true) => (CandidateStatus::Valid, None),
                (Some(g), false) => (
                    CandidateStatus::Warning,
                    Some(format!(
                        "Filename does not follow the naming convention; matched gym '{}' by prefix",
                        g.code
                    )),
                ),
                (None, _) => (
                    CandidateStatus::Warning,
                    Some("No gym match; stored as unassigned admin resource".to_string()),
                ),
            },
        };

        DerivedName {
            parsed,
            gym,
            status,
            message,
        }
    }

    /// Replace a candidate's derived fields from a parse/resolve result.
    fn apply_derived(candidate: &mut UploadCandidate, derived: DerivedName) {
        candidate.gym_code = derived.parsed.gym_code.clone();
        candidate.asset_type = derived.parsed.asset_type.clone();
        candidate.descriptor = derived.parsed.descriptor.clone();
        candidate.variant = derived.parsed.variant;
        candidate.category = classify_category(&candidate.file.content_type);
        candidate.status = derived.status;
        candidate.status_message = derived.message;

        match derived.gym {
            Some(gym) => {
                candidate.gym_id = Some(gym.id);
                candidate.gym_name = Some(gym.name);
                candidate.is_admin_resource = false;
            }
            None => {
                candidate.gym_id = None;
                candidate.gym_name = None;
                candidate.is_admin_resource = true;
            }
        }
    }
}
