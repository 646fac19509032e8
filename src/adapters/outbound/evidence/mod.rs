/// Evidence adapters: archive inspection, registry lookups and runtime results
mod registry_inspector;
mod runtime_report_reader;
mod zip_inspector;

pub use registry_inspector::RegistryInspector;
pub use runtime_report_reader::RuntimeReportReader;
pub use zip_inspector::{ZipArchiveInspector, ARCHIVE_EXTENSIONS};
