/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the CLI and the use cases,
/// keeping the compatibility domain isolated.
mod analysis_request;
mod evidence_settings;
mod output_format;

pub use analysis_request::{AnalysisRequest, DEFAULT_OS_KNOWLEDGE_BASE_SUFFIX};
pub use evidence_settings::EvidenceSettings;
pub use output_format::OutputFormat;
