//! Campaign/bulk asset ingestion pipeline
//!
//! Per dropped file: parse → resolve gym → classify → track status →
//! (optionally) request an AI-suggested name → commit to storage and the
//! metadata catalog.

pub mod pipeline;
pub mod types;

pub use pipeline::{IngestFlow, IngestLimits, IngestPipeline};
pub use types::{
    AnalysisReport, AnalysisStatus, CandidateFilter, CandidateStatus, CommitReport, IncomingFile,
    UploadCandidate, UploadStatus,
};
