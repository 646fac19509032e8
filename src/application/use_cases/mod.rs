/// Use cases module containing application business logic orchestration
mod analyze_sbom;
mod collect_evidence;
mod merge_reports;

pub use analyze_sbom::{AnalyzeSbomUseCase, SBOM_DETECTED_OS_PROPERTY};
pub use collect_evidence::{EvidenceCollector, EvidenceReport};
pub use merge_reports::{runtime_outcomes, MergeReportsUseCase};
