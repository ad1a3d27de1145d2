//! Brandhub services
//!
//! The ingestion pipeline and its external collaborators: the captioning
//! provider and the naming helper built over the asset catalog.

pub mod captioning;
pub mod ingest;
pub mod naming_helper;

pub use captioning::http::HttpCaptionerConfig;
pub use captioning::{CaptionContext, CaptionSuggestion, Captioner, HttpCaptioner};
pub use ingest::{
    AnalysisReport, AnalysisStatus, CandidateFilter, CandidateStatus, CommitReport, IncomingFile,
    IngestFlow, IngestLimits, IngestPipeline, UploadCandidate, UploadStatus,
};
pub use naming_helper::next_available_name;
