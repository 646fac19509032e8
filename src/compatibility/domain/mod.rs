pub mod analysis;
pub mod component;
pub mod deny_entry;
pub mod evidence;
pub mod record;
pub mod verdict;

pub use analysis::{AnalysisResult, AnalysisSummary, ErrorRecord};
pub use component::{ComponentType, SoftwareComponent};
pub use deny_entry::DenyEntry;
pub use evidence::{NativeCodeEvidence, NativeSignal, RuntimeOutcome, TargetArchitecture};
pub use record::{CompatibilityRecord, Confidence};
pub use verdict::{CompatibilityResult, CompatibilityStatus, ComponentResult};
