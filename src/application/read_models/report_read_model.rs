//! Report read model shared by formatters and the report merge command

use crate::compatibility::domain::{AnalysisResult, ComponentResult, ErrorRecord};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main read model for an analysis report
///
/// Serialized as-is by the JSON formatter, so its shape is the report
/// format: `components`, `summary`, `errors`, `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportReadModel {
    pub components: Vec<ComponentResult>,
    pub summary: SummaryView,
    #[serde(default)]
    pub errors: Vec<ErrorRecord>,
    pub metadata: ReportMetadataView,
}

/// Status counters as they appear in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub total_components: usize,
    pub compatible: usize,
    pub incompatible: usize,
    pub needs_upgrade: usize,
    pub needs_verification: usize,
    pub needs_version_verification: usize,
    pub unknown: usize,
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadataView {
    pub detected_os: Option<String>,
    pub source_document: String,
    pub analysis_id: String,
    pub generated_at: String,
    pub tool_name: String,
    pub tool_version: String,
    pub target_architecture: String,
}

impl ReportReadModel {
    /// Parses a report previously written by the JSON formatter.
    pub fn from_json(label: &str, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            AnalysisError::DocumentLoad {
                document: label.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Rebuilds the analysis result a report was rendered from.
    ///
    /// Stored counters are discarded; the returned result derives them from
    /// the component list again.
    pub fn into_analysis_result(self) -> AnalysisResult {
        let processing_time =
            Duration::try_from_secs_f64(self.summary.processing_time_seconds).unwrap_or_default();
        AnalysisResult::new(
            self.components,
            self.errors,
            processing_time,
            self.metadata.detected_os,
            self.metadata.source_document,
        )
    }
}
