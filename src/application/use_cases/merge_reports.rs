use crate::application::read_models::ReportReadModel;
use crate::compatibility::domain::{AnalysisResult, RuntimeOutcome, SoftwareComponent};
use crate::compatibility::services::ResultMerger;
use crate::ports::outbound::{DocumentReader, ProgressReporter, RuntimeEvidenceSource};
use crate::shared::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Looks up the runtime outcome of every component, keyed by identity.
pub fn runtime_outcomes<'a, I>(
    components: I,
    source: &dyn RuntimeEvidenceSource,
) -> HashMap<String, RuntimeOutcome>
where
    I: IntoIterator<Item = &'a SoftwareComponent>,
{
    components
        .into_iter()
        .filter_map(|c| source.outcome(c).map(|outcome| (c.identity_key(), outcome)))
        .collect()
}

/// MergeReportsUseCase - recombines previously written JSON reports
///
/// Reports are read back into analysis results, concatenated in argument
/// order and optionally re-merged with runtime outcomes. Counters are always
/// derived from the combined component list, never summed from the inputs.
pub struct MergeReportsUseCase<R, PR> {
    reader: R,
    progress_reporter: PR,
    runtime_evidence: Option<Box<dyn RuntimeEvidenceSource>>,
}

impl<R, PR> MergeReportsUseCase<R, PR>
where
    R: DocumentReader,
    PR: ProgressReporter,
{
    pub fn new(reader: R, progress_reporter: PR) -> Self {
        Self {
            reader,
            progress_reporter,
            runtime_evidence: None,
        }
    }

    pub fn with_runtime_evidence(mut self, source: Box<dyn RuntimeEvidenceSource>) -> Self {
        self.runtime_evidence = Some(source);
        self
    }

    pub fn execute(&self, report_paths: &[PathBuf]) -> Result<AnalysisResult> {
        let mut results = Vec::with_capacity(report_paths.len());

        for path in report_paths {
            self.progress_reporter
                .report(&format!("📖 Loading report from: {}", path.display()));
            let label = path.display().to_string();
            let content = self.reader.read_document(path, "report")?;
            let result = ReportReadModel::from_json(&label, &content)?.into_analysis_result();
            results.push(self.apply_runtime_evidence(result));
        }

        let combined = ResultMerger::combine(results)
            .ok_or_else(|| anyhow::anyhow!("No reports to merge"))?;

        self.progress_reporter.report(&format!(
            "✅ Merged {} report(s) into {} component(s)",
            report_paths.len(),
            combined.components().len()
        ));
        Ok(combined)
    }

    fn apply_runtime_evidence(&self, result: AnalysisResult) -> AnalysisResult {
        match &self.runtime_evidence {
            Some(source) => {
                let outcomes = runtime_outcomes(
                    result.components().iter().map(|r| &r.component),
                    source.as_ref(),
                );
                ResultMerger::merge_all(result, &outcomes)
            }
            None => result,
        }
    }
}
