use crate::adapters::outbound::parsers::{CycloneDxParser, SpdxParser, SyftParser};
use crate::ports::outbound::{SbomFormat, SbomParser};
use crate::shared::error::AnalysisError;
use serde_json::Value;

/// Top-level keys that together identify Syft's native JSON
const SYFT_KEYS: &[&str] = &["artifacts", "artifactRelationships", "descriptor", "source"];

/// Factory choosing the SBOM parser for a decoded document
///
/// Detection is by top-level keys, in this order: CycloneDX (`bomFormat`
/// mentions CycloneDX), Syft (all of `artifacts`, `artifactRelationships`,
/// `descriptor` and `source`), SPDX (`spdxVersion` plus `packages`).
/// Anything else is rejected; there is no fallback parser.
pub struct ParserFactory;

impl ParserFactory {
    pub fn detect_format(document: &Value, source_document: &str) -> Result<SbomFormat, AnalysisError> {
        let object = document
            .as_object()
            .ok_or_else(|| AnalysisError::UnrecognizedFormat {
                source_document: source_document.to_string(),
                keys: "(not a JSON object)".to_string(),
            })?;

        let is_cyclonedx = object
            .get("bomFormat")
            .and_then(Value::as_str)
            .is_some_and(|f| f.contains("CycloneDX"));
        if is_cyclonedx {
            return Ok(SbomFormat::CycloneDx);
        }

        if SYFT_KEYS.iter().all(|key| object.contains_key(*key)) {
            return Ok(SbomFormat::Syft);
        }

        let has_spdx_version = object.keys().any(|k| k.eq_ignore_ascii_case("spdxVersion"));
        if has_spdx_version && object.contains_key("packages") {
            return Ok(SbomFormat::Spdx);
        }

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        Err(AnalysisError::UnrecognizedFormat {
            source_document: source_document.to_string(),
            keys: keys.join(", "),
        })
    }

    pub fn create(format: SbomFormat) -> Box<dyn SbomParser> {
        match format {
            SbomFormat::CycloneDx => Box::new(CycloneDxParser::new()),
            SbomFormat::Spdx => Box::new(SpdxParser::new()),
            SbomFormat::Syft => Box::new(SyftParser::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_cyclonedx() {
        let doc = json!({"bomFormat": "CycloneDX", "specVersion": "1.5", "components": []});
        assert_eq!(ParserFactory::detect_format(&doc, "a").unwrap(), SbomFormat::CycloneDx);
    }

    #[test]
    fn test_detect_syft() {
        let doc = json!({"artifacts": [], "artifactRelationships": [], "descriptor": {}, "source": {}});
        assert_eq!(ParserFactory::detect_format(&doc, "a").unwrap(), SbomFormat::Syft);
    }

    #[test]
    fn test_detect_spdx() {
        let doc = json!({"spdxVersion": "SPDX-2.3", "packages": [], "relationships": []});
        assert_eq!(ParserFactory::detect_format(&doc, "a").unwrap(), SbomFormat::Spdx);
    }

    #[test]
    fn test_partial_syft_document_is_rejected() {
        let doc = json!({"artifacts": [], "source": {}});
        let err = ParserFactory::detect_format(&doc, "scan.json").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("scan.json"));
        assert!(message.contains("artifacts, source"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(ParserFactory::detect_format(&json!([1, 2]), "a").is_err());
    }

    #[test]
    fn test_created_parser_matches_format() {
        for format in [SbomFormat::CycloneDx, SbomFormat::Spdx, SbomFormat::Syft] {
            assert_eq!(ParserFactory::create(format).format(), format);
        }
    }
}
