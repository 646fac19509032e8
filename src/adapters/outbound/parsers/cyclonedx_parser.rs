use super::{array_field, build_component, os_identifier, str_field, SBOM_TYPE_PROPERTY};
use crate::compatibility::domain::ComponentType;
use crate::ports::outbound::{ParsedSbom, SbomFormat, SbomParser};
use crate::shared::Result;
use serde_json::Value;

/// CycloneDxParser adapter for CycloneDX JSON documents
///
/// Walks `components[]`, including components nested inside other
/// components. An `operating-system` component names the platform and is not
/// itself analyzed.
pub struct CycloneDxParser;

impl CycloneDxParser {
    pub fn new() -> Self {
        Self
    }

    fn collect(
        &self,
        entries: &[Value],
        path: &str,
        source_document: &str,
        parsed: &mut ParsedSbom,
    ) -> Result<()> {
        for (index, entry) in entries.iter().enumerate() {
            let entry_ref = format!("{}:{}[{}]", source_document, path, index);
            let type_label = str_field(entry, "type").unwrap_or("library");
            let name = str_field(entry, "name");
            let version = str_field(entry, "version");

            if type_label.eq_ignore_ascii_case("operating-system") {
                if parsed.detected_os.is_none() {
                    parsed.detected_os = name.map(|name| os_identifier(name, version));
                }
                continue;
            }

            match build_component(
                source_document,
                entry_ref.clone(),
                name,
                version,
                ComponentType::from_sbom_label(type_label),
                str_field(entry, "purl"),
            ) {
                Ok(mut component) => {
                    component = component.with_property(SBOM_TYPE_PROPERTY, type_label);
                    if let Some(group) = str_field(entry, "group") {
                        component = component.with_property("group", group);
                    }
                    for property in array_field(entry, "properties", "CycloneDX")? {
                        if let (Some(key), Some(value)) =
                            (str_field(property, "name"), str_field(property, "value"))
                        {
                            component = component.with_property(key, value);
                        }
                    }
                    parsed.components.push(component);
                }
                Err(record) => parsed.errors.push(record),
            }

            let nested = array_field(entry, "components", "CycloneDX")?;
            if !nested.is_empty() {
                self.collect(
                    nested,
                    &format!("{}[{}].components", path, index),
                    source_document,
                    parsed,
                )?;
            }
        }
        Ok(())
    }
}

impl Default for CycloneDxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomParser for CycloneDxParser {
    fn format(&self) -> SbomFormat {
        SbomFormat::CycloneDx
    }

    fn parse(&self, document: &Value, source_document: &str) -> Result<ParsedSbom> {
        let mut parsed = ParsedSbom::default();

        // container scans put the image OS under metadata.component
        if let Some(root) = document.get("metadata").and_then(|m| m.get("component")) {
            if str_field(root, "type").is_some_and(|t| t.eq_ignore_ascii_case("operating-system")) {
                if let Some(name) = str_field(root, "name") {
                    parsed.detected_os = Some(os_identifier(name, str_field(root, "version")));
                }
            }
        }

        let components = array_field(document, "components", "CycloneDX")?;
        self.collect(components, "components", source_document, &mut parsed)?;
        Ok(parsed)
    }
}
