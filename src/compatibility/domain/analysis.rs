use super::verdict::{CompatibilityStatus, ComponentResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A recoverable problem recorded during analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub component_ref: String,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(component_ref: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component_ref: component_ref.into(),
            message: message.into(),
        }
    }
}

/// Per-status counters. Always derived from a component list, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub total_components: usize,
    pub compatible: usize,
    pub incompatible: usize,
    pub needs_upgrade: usize,
    pub needs_verification: usize,
    pub needs_version_verification: usize,
    pub unknown: usize,
}

impl AnalysisSummary {
    pub fn from_results(results: &[ComponentResult]) -> Self {
        results
            .iter()
            .fold(Self::default(), |mut summary, result| {
                summary.total_components += 1;
                match result.status() {
                    CompatibilityStatus::Compatible => summary.compatible += 1,
                    CompatibilityStatus::Incompatible => summary.incompatible += 1,
                    CompatibilityStatus::NeedsUpgrade => summary.needs_upgrade += 1,
                    CompatibilityStatus::NeedsVerification => summary.needs_verification += 1,
                    CompatibilityStatus::NeedsVersionVerification => {
                        summary.needs_version_verification += 1
                    }
                    CompatibilityStatus::Unknown => summary.unknown += 1,
                }
                summary
            })
    }

    pub fn count(&self, status: CompatibilityStatus) -> usize {
        match status {
            CompatibilityStatus::Compatible => self.compatible,
            CompatibilityStatus::Incompatible => self.incompatible,
            CompatibilityStatus::NeedsUpgrade => self.needs_upgrade,
            CompatibilityStatus::NeedsVerification => self.needs_verification,
            CompatibilityStatus::NeedsVersionVerification => self.needs_version_verification,
            CompatibilityStatus::Unknown => self.unknown,
        }
    }
}

/// Outcome of analyzing one or more SBOM documents.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    components: Vec<ComponentResult>,
    errors: Vec<ErrorRecord>,
    processing_time: Duration,
    detected_os: Option<String>,
    source_document: String,
}

impl AnalysisResult {
    pub fn new(
        components: Vec<ComponentResult>,
        errors: Vec<ErrorRecord>,
        processing_time: Duration,
        detected_os: Option<String>,
        source_document: impl Into<String>,
    ) -> Self {
        Self {
            components,
            errors,
            processing_time,
            detected_os,
            source_document: source_document.into(),
        }
    }

    pub fn components(&self) -> &[ComponentResult] {
        &self.components
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }

    pub fn detected_os(&self) -> Option<&str> {
        self.detected_os.as_deref()
    }

    pub fn source_document(&self) -> &str {
        &self.source_document
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::from_results(&self.components)
    }

    pub fn has_incompatible(&self) -> bool {
        self.components
            .iter()
            .any(|c| c.status() == CompatibilityStatus::Incompatible)
    }

    /// Same metadata, new component list. Counters follow automatically.
    pub fn with_components(self, components: Vec<ComponentResult>) -> Self {
        Self { components, ..self }
    }

    pub fn with_errors(mut self, errors: impl IntoIterator<Item = ErrorRecord>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn into_parts(self) -> (Vec<ComponentResult>, Vec<ErrorRecord>) {
        (self.components, self.errors)
    }
}
