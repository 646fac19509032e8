use super::{array_field, build_component, os_identifier, str_field, SBOM_TYPE_PROPERTY};
use crate::compatibility::domain::component::purl_type;
use crate::compatibility::domain::ComponentType;
use crate::ports::outbound::{ParsedSbom, SbomFormat, SbomParser};
use crate::shared::Result;
use serde_json::Value;

/// SpdxParser adapter for SPDX 2.x JSON documents
///
/// The package URL comes from the `purl` external reference. The
/// `primaryPackagePurpose` decides the component type, falling back to the
/// purl type; an `OPERATING-SYSTEM` package names the platform.
pub struct SpdxParser;

impl SpdxParser {
    pub fn new() -> Self {
        Self
    }

    fn purl(package: &Value) -> Option<&str> {
        package
            .get("externalRefs")
            .and_then(Value::as_array)?
            .iter()
            .find(|r| {
                str_field(r, "referenceType").is_some_and(|t| t.eq_ignore_ascii_case("purl"))
            })
            .and_then(|r| str_field(r, "referenceLocator"))
    }
}

impl Default for SpdxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomParser for SpdxParser {
    fn format(&self) -> SbomFormat {
        SbomFormat::Spdx
    }

    fn parse(&self, document: &Value, source_document: &str) -> Result<ParsedSbom> {
        let mut parsed = ParsedSbom::default();

        for (index, package) in array_field(document, "packages", "SPDX")?.iter().enumerate() {
            // the document root describes the scanned target, not a dependency
            if str_field(package, "SPDXID").is_some_and(|id| id.starts_with("SPDXRef-DocumentRoot")) {
                continue;
            }

            let name = str_field(package, "name");
            let version = str_field(package, "versionInfo");
            let purl = Self::purl(package);
            let purpose = str_field(package, "primaryPackagePurpose").map(str::to_lowercase);

            if purpose.as_deref() == Some("operating-system") {
                if parsed.detected_os.is_none() {
                    parsed.detected_os = name.map(|name| os_identifier(name, version));
                }
                continue;
            }

            let label = purpose
                .or_else(|| purl.and_then(purl_type).map(str::to_string))
                .unwrap_or_else(|| "library".to_string());

            match build_component(
                source_document,
                format!("{}:packages[{}]", source_document, index),
                name,
                version,
                ComponentType::from_sbom_label(&label),
                purl,
            ) {
                Ok(component) => parsed
                    .components
                    .push(component.with_property(SBOM_TYPE_PROPERTY, label)),
                Err(record) => parsed.errors.push(record),
            }
        }

        Ok(parsed)
    }
}
