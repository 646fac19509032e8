use crate::compatibility::domain::{
    CompatibilityResult, NativeCodeEvidence, SoftwareComponent, TargetArchitecture,
};
use crate::compatibility::services::{
    CompatibilityClassifier, DenyListOverlay, KnowledgeBaseStore, Matcher, NativeCodeScanner,
};
use crate::shared::error::AnalysisError;
use tracing::debug;

/// AnalysisContext - everything classification reads, built once per run
///
/// Holds the knowledge base, the deny list and the matching and target
/// settings. Shared by reference (and across rayon workers) once built;
/// nothing in it changes during an analysis.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    store: KnowledgeBaseStore,
    deny_list: DenyListOverlay,
    matcher: Matcher,
    classifier: CompatibilityClassifier,
    scanner: NativeCodeScanner,
    target: TargetArchitecture,
}

impl AnalysisContext {
    pub fn new(
        store: KnowledgeBaseStore,
        deny_list: DenyListOverlay,
        matcher: Matcher,
        target: TargetArchitecture,
    ) -> Self {
        Self {
            store,
            deny_list,
            matcher,
            classifier: CompatibilityClassifier::new(target),
            scanner: NativeCodeScanner::new(target),
            target,
        }
    }

    pub fn store(&self) -> &KnowledgeBaseStore {
        &self.store
    }

    pub fn deny_list(&self) -> &DenyListOverlay {
        &self.deny_list
    }

    pub fn scanner(&self) -> NativeCodeScanner {
        self.scanner
    }

    pub fn target(&self) -> TargetArchitecture {
        self.target
    }

    /// Copy of this context whose store also holds the entries of an
    /// OS-specific document that were not already known.
    pub fn with_os_overlay(&self, label: &str, content: &str) -> Result<Self, AnalysisError> {
        let mut context = self.clone();
        context.store.merge_os_overlay(label, content)?;
        Ok(context)
    }

    /// Deny list, then knowledge-base match, then classification.
    pub fn classify(
        &self,
        component: &SoftwareComponent,
        evidence: Option<&NativeCodeEvidence>,
    ) -> CompatibilityResult {
        let deny = self.deny_list.check(component.name());
        if let Some(entry) = deny {
            debug!(component = %component, pattern = %entry.pattern, "Deny list match");
        }
        let record = self
            .matcher
            .resolve(component, &self.store)
            .map(|m| m.record);
        self.classifier.classify(component, record, deny, evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::domain::{CompatibilityStatus, ComponentType, DenyEntry};
    use crate::compatibility::services::NameNormalizer;

    const KB: &str = r#"{"entries": [
        {"name": "pandas", "compatible": true, "minimum_supported_version": "1.4.0",
         "recommended_version": "2.0.0", "confidence": "HIGH"}
    ]}"#;

    fn context(deny: Vec<DenyEntry>) -> AnalysisContext {
        let (store, _) = KnowledgeBaseStore::load(NameNormalizer::default(), [("kb.json", KB)], false);
        AnalysisContext::new(
            store,
            DenyListOverlay::new(deny).unwrap(),
            Matcher::default(),
            TargetArchitecture::Arm64,
        )
    }

    fn component(name: &str, version: &str) -> SoftwareComponent {
        SoftwareComponent::new(name, version, ComponentType::Library, "sbom.json").unwrap()
    }

    #[test]
    fn test_classify_through_context() {
        let ctx = context(vec![]);
        assert_eq!(
            ctx.classify(&component("pandas", "1.0.0"), None).status,
            CompatibilityStatus::NeedsUpgrade
        );
        assert_eq!(
            ctx.classify(&component("obscure-lib", "9.9"), None).status,
            CompatibilityStatus::Unknown
        );
    }

    #[test]
    fn test_deny_list_wins_over_knowledge_base() {
        let ctx = context(vec![DenyEntry::new("pand*", "blocked")]);
        let result = ctx.classify(&component("pandas", "1.5.0"), None);
        assert_eq!(result.status, CompatibilityStatus::Incompatible);
        assert!(result.deny_listed);
    }

    #[test]
    fn test_with_os_overlay_leaves_original_untouched() {
        let ctx = context(vec![]);
        let overlay = r#"{"entries": [{"name": "bash", "compatible": true, "confidence": "HIGH"}]}"#;
        let merged = ctx.with_os_overlay("ubuntu-22.04-packages.json", overlay).unwrap();

        assert!(merged.store().get("bash").is_some());
        assert!(ctx.store().get("bash").is_none());
        assert_eq!(
            merged.classify(&component("bash", "5.1"), None).status,
            CompatibilityStatus::Compatible
        );
    }

    #[test]
    fn test_with_os_overlay_rejects_broken_document() {
        let ctx = context(vec![]);
        assert!(ctx.with_os_overlay("os.json", "nope").is_err());
    }
}
