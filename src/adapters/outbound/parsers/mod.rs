/// SBOM parser adapters, one per supported document format
mod cyclonedx_parser;
mod spdx_parser;
mod syft_parser;

pub use cyclonedx_parser::CycloneDxParser;
pub use spdx_parser::SpdxParser;
pub use syft_parser::SyftParser;

use crate::compatibility::domain::{ComponentType, ErrorRecord, SoftwareComponent};
use crate::shared::error::AnalysisError;
use serde_json::Value;

/// Property recording the package type the SBOM generator reported
const SBOM_TYPE_PROPERTY: &str = "sbom_type";

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Array under `key`; a missing key is an empty list, anything else that is
/// not an array is an error.
fn array_field<'a>(document: &'a Value, key: &str, format: &str) -> crate::shared::Result<&'a [Value]> {
    match document.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(AnalysisError::Validation {
            message: format!("{} document field '{}' is not an array", format, key),
        }
        .into()),
    }
}

/// Builds a component or the error record explaining why it was skipped.
fn build_component(
    source_document: &str,
    entry_ref: String,
    name: Option<&str>,
    version: Option<&str>,
    component_type: ComponentType,
    purl: Option<&str>,
) -> Result<SoftwareComponent, ErrorRecord> {
    let reason = match name {
        None => "missing component name".to_string(),
        Some(name) => {
            match SoftwareComponent::new(name, version.unwrap_or(""), component_type, source_document) {
                Ok(component) => return Ok(component.with_origin(purl.unwrap_or(""))),
                Err(e) => e.to_string(),
            }
        }
    };

    let error = AnalysisError::ComponentSkipped {
        component_ref: entry_ref.clone(),
        reason,
    };
    Err(ErrorRecord::new(entry_ref, error.to_string()))
}

/// `<id>-<version>` in lowercase, or just the id when the version is unknown.
fn os_identifier(id: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}-{}", id, version).to_lowercase(),
        None => id.to_lowercase(),
    }
}
