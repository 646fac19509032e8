use crate::compatibility::domain::{ErrorRecord, SoftwareComponent};
use crate::shared::Result;
use serde_json::Value;
use std::fmt;

/// Supported SBOM document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbomFormat {
    CycloneDx,
    Spdx,
    Syft,
}

impl fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SbomFormat::CycloneDx => write!(f, "CycloneDX"),
            SbomFormat::Spdx => write!(f, "SPDX"),
            SbomFormat::Syft => write!(f, "Syft"),
        }
    }
}

/// Components extracted from one SBOM document
#[derive(Debug, Default)]
pub struct ParsedSbom {
    pub components: Vec<SoftwareComponent>,
    /// `<os-id>-<version>` when the document names its operating system
    pub detected_os: Option<String>,
    /// Entries that could not become components
    pub errors: Vec<ErrorRecord>,
}

/// SbomParser port, one implementation per document format
pub trait SbomParser {
    fn format(&self) -> SbomFormat;

    /// Parses an already-decoded document
    ///
    /// # Arguments
    /// * `document` - The decoded JSON document
    /// * `source_document` - Label recorded on every produced component
    ///
    /// # Errors
    /// Returns an error if the document does not have the format's shape
    fn parse(&self, document: &Value, source_document: &str) -> Result<ParsedSbom>;
}
