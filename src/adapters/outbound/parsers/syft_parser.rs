use super::{array_field, build_component, os_identifier, str_field, SBOM_TYPE_PROPERTY};
use crate::compatibility::domain::ComponentType;
use crate::ports::outbound::{ParsedSbom, SbomFormat, SbomParser};
use crate::shared::Result;
use serde_json::Value;

/// SyftParser adapter for Syft's native JSON output
///
/// Reads `artifacts[]` and takes the operating system from
/// `distro.id` + `distro.versionID`.
pub struct SyftParser;

impl SyftParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SyftParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomParser for SyftParser {
    fn format(&self) -> SbomFormat {
        SbomFormat::Syft
    }

    fn parse(&self, document: &Value, source_document: &str) -> Result<ParsedSbom> {
        let mut parsed = ParsedSbom {
            detected_os: document.get("distro").and_then(|distro| {
                str_field(distro, "id")
                    .map(|id| os_identifier(id, str_field(distro, "versionID")))
            }),
            ..Default::default()
        };

        for (index, artifact) in array_field(document, "artifacts", "Syft")?.iter().enumerate() {
            let type_label = str_field(artifact, "type").unwrap_or("library");
            match build_component(
                source_document,
                format!("{}:artifacts[{}]", source_document, index),
                str_field(artifact, "name"),
                str_field(artifact, "version"),
                ComponentType::from_sbom_label(type_label),
                str_field(artifact, "purl"),
            ) {
                Ok(mut component) => {
                    component = component.with_property(SBOM_TYPE_PROPERTY, type_label);
                    if let Some(language) = str_field(artifact, "language") {
                        component = component.with_property("language", language);
                    }
                    parsed.components.push(component);
                }
                Err(record) => parsed.errors.push(record),
            }
        }

        Ok(parsed)
    }
}
