//! Builder for constructing ReportReadModel from an analysis result

use super::report_read_model::{ReportMetadataView, ReportReadModel, SummaryView};
use crate::compatibility::domain::{AnalysisResult, TargetArchitecture};
use chrono::Utc;
use uuid::Uuid;

const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builder for constructing ReportReadModel from domain objects
///
/// Each build stamps a fresh `analysis_id` and `generated_at`.
pub struct ReportReadModelBuilder;

impl ReportReadModelBuilder {
    pub fn build(result: &AnalysisResult, target: TargetArchitecture) -> ReportReadModel {
        ReportReadModel {
            components: result.components().to_vec(),
            summary: Self::build_summary(result),
            errors: result.errors().to_vec(),
            metadata: Self::build_metadata(result, target),
        }
    }

    fn build_summary(result: &AnalysisResult) -> SummaryView {
        let summary = result.summary();
        SummaryView {
            total_components: summary.total_components,
            compatible: summary.compatible,
            incompatible: summary.incompatible,
            needs_upgrade: summary.needs_upgrade,
            needs_verification: summary.needs_verification,
            needs_version_verification: summary.needs_version_verification,
            unknown: summary.unknown,
            processing_time_seconds: result.processing_time().as_secs_f64(),
        }
    }

    fn build_metadata(result: &AnalysisResult, target: TargetArchitecture) -> ReportMetadataView {
        ReportMetadataView {
            detected_os: result.detected_os().map(str::to_string),
            source_document: result.source_document().to_string(),
            analysis_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            tool_name: TOOL_NAME.to_string(),
            tool_version: TOOL_VERSION.to_string(),
            target_architecture: target.to_string(),
        }
    }
}
