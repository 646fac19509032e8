/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, archives, network, console).
pub mod document_reader;
pub mod evidence;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_parser;

pub use document_reader::DocumentReader;
pub use evidence::{EvidenceError, NativeCodeInspector, PackageLookup, RuntimeEvidenceSource};
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_parser::{ParsedSbom, SbomFormat, SbomParser};
