use crate::compatibility::domain::{CompatibilityRecord, Confidence};
use crate::compatibility::services::NameNormalizer;
use crate::shared::error::AnalysisError;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Label used for the embedded fallback document in logs and errors
pub const BUILTIN_KNOWLEDGE_BASE_LABEL: &str = "<built-in knowledge base>";

const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../../../data/builtin_knowledge_base.json");

/// On-disk knowledge-base document
#[derive(Debug, Deserialize)]
pub struct KnowledgeBaseDocument {
    pub entries: Vec<KnowledgeBaseEntry>,
}

#[derive(Debug, Deserialize)]
pub struct KnowledgeBaseEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub compatible: bool,
    #[serde(default)]
    pub minimum_supported_version: Option<String>,
    #[serde(default)]
    pub recommended_version: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: Confidence,
    #[serde(default)]
    pub ecosystem: Option<String>,
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<Confidence, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl KnowledgeBaseDocument {
    pub fn parse(label: &str, content: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(content).map_err(|e| AnalysisError::DocumentLoad {
            document: label.to_string(),
            details: e.to_string(),
        })
    }
}

impl KnowledgeBaseEntry {
    fn into_record(self) -> Option<CompatibilityRecord> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }

        let mut record = CompatibilityRecord::new(name, self.compatible, self.confidence)
            .with_aliases(&self.aliases)
            .with_notes(self.notes.unwrap_or_default());
        record.minimum_supported_version = non_blank(self.minimum_supported_version);
        record.recommended_version = non_blank(self.recommended_version);
        if let Some(ecosystem) = non_blank(self.ecosystem) {
            record = record.with_ecosystem(ecosystem);
        }
        Some(record)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Outcome of loading a set of knowledge-base documents
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents_loaded: usize,
    pub used_builtin: bool,
    pub errors: Vec<AnalysisError>,
}

/// KnowledgeBaseStore - indexed compatibility records
///
/// Records are keyed by [`CompatibilityRecord::storage_key`]. Three indexes
/// sit beside them:
/// - `aliases`: lowercased alias (ecosystem-prefixed for qualified records)
///   to storage key, each alias bound to exactly one record
/// - `normalized`: fuzzy key (see [`NameNormalizer`]) to storage key
///
/// The store is filled once before analysis and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBaseStore {
    records: HashMap<String, CompatibilityRecord>,
    aliases: HashMap<String, String>,
    normalized: HashMap<String, String>,
    normalizer: NameNormalizer,
}

impl KnowledgeBaseStore {
    pub fn new(normalizer: NameNormalizer) -> Self {
        Self {
            normalizer,
            ..Default::default()
        }
    }

    /// Loads documents in order; the first document to define a canonical
    /// name owns it.
    ///
    /// Documents that fail to parse are logged, reported and skipped. When
    /// nothing loads and `use_builtin` is set, the embedded fallback document
    /// is loaded instead.
    pub fn load<I, L, C>(normalizer: NameNormalizer, documents: I, use_builtin: bool) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = (L, C)>,
        L: AsRef<str>,
        C: AsRef<str>,
    {
        let mut store = Self::new(normalizer);
        let mut report = LoadReport::default();

        for (label, content) in documents {
            match store.add_document(label.as_ref(), content.as_ref()) {
                Ok(_) => report.documents_loaded += 1,
                Err(e) => {
                    warn!(document = label.as_ref(), error = %e, "Skipping knowledge base document");
                    report.errors.push(e);
                }
            }
        }

        if report.documents_loaded == 0 && use_builtin {
            match store.add_document(BUILTIN_KNOWLEDGE_BASE_LABEL, BUILTIN_KNOWLEDGE_BASE) {
                Ok(_) => report.used_builtin = true,
                Err(e) => report.errors.push(e),
            }
        }

        if store.is_empty() {
            warn!("Knowledge base is empty; every component will be reported as unknown");
        }

        (store, report)
    }

    /// Adds one document. Returns the number of new canonical records.
    ///
    /// Within the document the last writer wins; across documents nothing
    /// already present is replaced or rebound. An entry for an existing
    /// canonical name may still contribute aliases that are not yet bound.
    pub fn add_document(&mut self, label: &str, content: &str) -> Result<usize, AnalysisError> {
        let document = KnowledgeBaseDocument::parse(label, content)?;

        let mut staged: HashMap<String, CompatibilityRecord> = HashMap::new();
        let mut staged_order: Vec<String> = Vec::new();
        let mut staged_aliases: HashMap<String, String> = HashMap::new();

        for entry in document.entries {
            let Some(record) = entry.into_record() else {
                warn!(document = label, "Ignoring knowledge base entry without a name");
                continue;
            };
            let key = record.storage_key();

            for alias in &record.aliases {
                staged_aliases.insert(qualify(record.ecosystem.as_deref(), alias), key.clone());
            }

            if self.records.contains_key(&key) {
                debug!(document = label, key = %key, "Canonical name already defined; keeping first");
                continue;
            }
            if staged.insert(key.clone(), record).is_none() {
                staged_order.push(key);
            }
        }

        let added = staged_order.len();
        for key in staged_order {
            if let Some(record) = staged.remove(&key) {
                self.insert_record(key, record);
            }
        }

        let mut alias_keys: Vec<(String, String)> = staged_aliases.into_iter().collect();
        alias_keys.sort();
        for (alias, key) in alias_keys {
            self.bind_alias(alias, key);
        }

        info!(
            document = label,
            added,
            total = self.records.len(),
            "Loaded knowledge base document"
        );
        Ok(added)
    }

    /// Merges an OS-specific document: only canonical names absent from the
    /// store are inserted (with their aliases); everything else is discarded.
    ///
    /// Applying the same document twice leaves the store unchanged.
    pub fn merge_os_overlay(&mut self, label: &str, content: &str) -> Result<usize, AnalysisError> {
        let document = KnowledgeBaseDocument::parse(label, content)?;
        let mut added = 0;

        for entry in document.entries {
            let Some(record) = entry.into_record() else {
                continue;
            };
            let key = record.storage_key();
            if self.records.contains_key(&key) {
                continue;
            }

            let aliases: Vec<String> = record
                .aliases
                .iter()
                .map(|a| qualify(record.ecosystem.as_deref(), a))
                .collect();
            self.insert_record(key.clone(), record);
            for alias in aliases {
                self.bind_alias(alias, key.clone());
            }
            added += 1;
        }

        info!(document = label, added, "Merged OS knowledge base overlay");
        Ok(added)
    }

    pub fn get(&self, key: &str) -> Option<&CompatibilityRecord> {
        self.records.get(key)
    }

    pub fn get_by_alias(&self, alias: &str) -> Option<&CompatibilityRecord> {
        self.aliases.get(alias).and_then(|key| self.records.get(key))
    }

    pub fn get_by_normalized(&self, normalized: &str) -> Option<&CompatibilityRecord> {
        self.normalized
            .get(normalized)
            .and_then(|key| self.records.get(key))
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert_record(&mut self, key: String, record: CompatibilityRecord) {
        let fuzzy = qualify(
            record.ecosystem.as_deref(),
            &self.normalizer.normalize(&record.canonical_name),
        );
        self.normalized.entry(fuzzy).or_insert_with(|| key.clone());
        self.records.insert(key, record);
    }

    fn bind_alias(&mut self, alias: String, key: String) {
        if alias == key || self.aliases.contains_key(&alias) {
            return;
        }
        let ecosystem = self.records.get(&key).and_then(|r| r.ecosystem.clone());
        let bare = match &ecosystem {
            Some(e) => alias.strip_prefix(&format!("{}:", e)).unwrap_or(&alias),
            None => alias.as_str(),
        };
        let fuzzy = qualify(ecosystem.as_deref(), &self.normalizer.normalize(bare));
        self.normalized.entry(fuzzy).or_insert_with(|| key.clone());
        self.aliases.insert(alias, key);
    }
}

/// Prefixes `name` with `ecosystem:` when the record is ecosystem-qualified.
pub(crate) fn qualify(ecosystem: Option<&str>, name: &str) -> String {
    match ecosystem {
        Some(e) => format!("{}:{}", e, name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"{
        "entries": [
            {"name": "pandas", "aliases": ["pd"], "compatible": true,
             "minimum_supported_version": "1.4.0", "recommended_version": "2.0.0",
             "notes": "wheels published for aarch64", "confidence": "high"},
            {"name": "PyYAML", "aliases": ["yaml"], "compatible": true, "confidence": "MEDIUM"}
        ]
    }"#;

    const SECOND: &str = r#"{
        "entries": [
            {"name": "pandas", "aliases": ["pandas-lib", "pd"], "compatible": false, "confidence": "LOW"},
            {"name": "numpy", "aliases": ["pd"], "compatible": true, "confidence": "HIGH"}
        ]
    }"#;

    fn store_from(docs: &[(&str, &str)]) -> (KnowledgeBaseStore, LoadReport) {
        KnowledgeBaseStore::load(NameNormalizer::default(), docs.iter().copied(), false)
    }

    #[test]
    fn test_load_single_document() {
        let (store, report) = store_from(&[("base.json", BASE)]);
        assert_eq!(report.documents_loaded, 1);
        assert!(report.errors.is_empty());
        assert_eq!(store.len(), 2);

        let pandas = store.get("pandas").unwrap();
        assert_eq!(pandas.minimum_supported_version.as_deref(), Some("1.4.0"));
        assert_eq!(pandas.confidence, Confidence::High);
        assert_eq!(store.get_by_alias("yaml").unwrap().canonical_name, "PyYAML");
    }

    #[test]
    fn test_first_document_wins_canonical_name() {
        let (store, _) = store_from(&[("base.json", BASE), ("second.json", SECOND)]);
        let pandas = store.get("pandas").unwrap();
        assert!(pandas.compatible);
        assert_eq!(pandas.confidence, Confidence::High);
        assert!(store.get("numpy").is_some());
    }

    #[test]
    fn test_alias_is_never_rebound_across_documents() {
        let (store, _) = store_from(&[("base.json", BASE), ("second.json", SECOND)]);
        assert_eq!(store.get_by_alias("pd").unwrap().canonical_name, "pandas");
        // later document may still add an unbound alias to an existing name
        assert_eq!(store.get_by_alias("pandas-lib").unwrap().canonical_name, "pandas");
    }

    #[test]
    fn test_last_writer_wins_within_one_document() {
        let doc = r#"{"entries": [
            {"name": "a", "aliases": ["shared"], "compatible": true, "confidence": "HIGH"},
            {"name": "b", "aliases": ["shared"], "compatible": true, "confidence": "HIGH"}
        ]}"#;
        let (store, _) = store_from(&[("doc.json", doc)]);
        assert_eq!(store.get_by_alias("shared").unwrap().canonical_name, "b");
    }

    #[test]
    fn test_invalid_document_is_skipped() {
        let (store, report) = store_from(&[("broken.json", "{not json"), ("base.json", BASE)]);
        assert_eq!(report.documents_loaded, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].to_string().contains("broken.json"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_invalid_confidence_fails_document() {
        let doc = r#"{"entries": [{"name": "x", "compatible": true, "confidence": "SURE"}]}"#;
        let (store, report) = store_from(&[("bad.json", doc)]);
        assert!(store.is_empty());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_no_documents_without_fallback_is_empty() {
        let (store, report) = store_from(&[]);
        assert!(store.is_empty());
        assert!(!report.used_builtin);
    }

    #[test]
    fn test_builtin_fallback_used_when_nothing_loads() {
        let (store, report) = KnowledgeBaseStore::load(
            NameNormalizer::default(),
            [("broken.json", "[")],
            true,
        );
        assert!(report.used_builtin);
        assert!(!store.is_empty());
        assert!(store.get("net.java.dev.jna:jna").is_some());
    }

    #[test]
    fn test_builtin_fallback_skipped_when_a_document_loads() {
        let (store, report) =
            KnowledgeBaseStore::load(NameNormalizer::default(), [("base.json", BASE)], true);
        assert!(!report.used_builtin);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_os_overlay_adds_only_absent_names() {
        let (mut store, _) = store_from(&[("base.json", BASE)]);
        let overlay = r#"{"entries": [
            {"name": "pandas", "compatible": false, "confidence": "LOW"},
            {"name": "bash", "aliases": ["gnu-bash"], "compatible": true, "confidence": "HIGH"}
        ]}"#;

        let added = store.merge_os_overlay("ubuntu-packages.json", overlay).unwrap();
        assert_eq!(added, 1);
        assert!(store.get("pandas").unwrap().compatible);
        assert_eq!(store.get_by_alias("gnu-bash").unwrap().canonical_name, "bash");
    }

    #[test]
    fn test_os_overlay_is_idempotent() {
        let (mut store, _) = store_from(&[("base.json", BASE)]);
        let overlay = r#"{"entries": [
            {"name": "bash", "aliases": ["yaml"], "compatible": true, "confidence": "HIGH"}
        ]}"#;

        store.merge_os_overlay("os.json", overlay).unwrap();
        let once = store.clone();
        let added = store.merge_os_overlay("os.json", overlay).unwrap();
        assert_eq!(added, 0);
        assert_eq!(store, once);
        // existing alias keeps pointing at the generic record
        assert_eq!(store.get_by_alias("yaml").unwrap().canonical_name, "PyYAML");
    }

    #[test]
    fn test_ecosystem_qualified_records_are_isolated() {
        let doc = r#"{"entries": [
            {"name": "core", "ecosystem": "npm", "aliases": ["core-js"], "compatible": true, "confidence": "HIGH"},
            {"name": "core", "ecosystem": "nuget", "compatible": false, "confidence": "HIGH"}
        ]}"#;
        let (store, _) = store_from(&[("doc.json", doc)]);
        assert!(store.get("core").is_none());
        assert!(store.get("npm:core").unwrap().compatible);
        assert!(!store.get("nuget:core").unwrap().compatible);
        assert!(store.get_by_alias("core-js").is_none());
        assert_eq!(store.get_by_alias("npm:core-js").unwrap().canonical_name, "core");
    }

    #[test]
    fn test_normalized_index() {
        let (store, _) = store_from(&[("base.json", BASE)]);
        assert_eq!(store.get_by_normalized("pyyaml").unwrap().canonical_name, "PyYAML");
        assert_eq!(store.get_by_normalized("pd").unwrap().canonical_name, "pandas");
    }
}
