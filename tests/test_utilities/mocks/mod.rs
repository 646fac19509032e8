/// Mock implementations for testing
mod mock_document_reader;
mod mock_inspector;
mod mock_progress_reporter;
mod mock_runtime_evidence;

pub use mock_document_reader::MockDocumentReader;
pub use mock_inspector::MockInspector;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_runtime_evidence::MockRuntimeEvidence;
