use crate::application::context::AnalysisContext;
use crate::application::dto::AnalysisRequest;
use crate::application::factories::ParserFactory;
use crate::application::use_cases::collect_evidence::{EvidenceCollector, EvidenceReport};
use crate::application::use_cases::merge_reports::runtime_outcomes;
use crate::compatibility::domain::{AnalysisResult, ComponentResult, SoftwareComponent};
use crate::compatibility::services::ResultMerger;
use crate::ports::outbound::{DocumentReader, ParsedSbom, ProgressReporter, RuntimeEvidenceSource};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use anyhow::Context;
use rayon::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Property set on every component of a document whose OS was detected
pub const SBOM_DETECTED_OS_PROPERTY: &str = "sbom_detected_os";

/// AnalyzeSbomUseCase - Core use case for compatibility analysis
///
/// For each SBOM document, in order:
/// 1. read, detect the format and parse it into components
/// 2. merge the OS knowledge base for the detected OS into a per-document
///    copy of the context
/// 3. collect native-code evidence (async, bounded)
/// 4. classify every component in parallel on the blocking pool; output
///    order equals input order
/// 5. fold in runtime outcomes
///
/// Per-document results are then combined into one result.
///
/// # Type Parameters
/// * `R` - DocumentReader implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeSbomUseCase<R, PR> {
    reader: R,
    progress_reporter: PR,
    context: Arc<AnalysisContext>,
    evidence_collector: EvidenceCollector,
    runtime_evidence: Option<Box<dyn RuntimeEvidenceSource>>,
}

impl<R, PR> AnalyzeSbomUseCase<R, PR>
where
    R: DocumentReader,
    PR: ProgressReporter,
{
    pub fn new(reader: R, progress_reporter: PR, context: AnalysisContext) -> Self {
        Self {
            reader,
            progress_reporter,
            context: Arc::new(context),
            evidence_collector: EvidenceCollector::default(),
            runtime_evidence: None,
        }
    }

    pub fn with_evidence_collector(mut self, collector: EvidenceCollector) -> Self {
        self.evidence_collector = collector;
        self
    }

    pub fn with_runtime_evidence(mut self, source: Box<dyn RuntimeEvidenceSource>) -> Self {
        self.runtime_evidence = Some(source);
        self
    }

    /// Executes the analysis
    ///
    /// # Errors
    /// Returns an error if an SBOM cannot be read, is not a recognized
    /// format, or lists no components at all
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResult> {
        let mut results = Vec::with_capacity(request.sbom_paths.len());
        for path in &request.sbom_paths {
            results.push(self.analyze_document(path, &request).await?);
        }

        let combined = ResultMerger::combine(results)
            .ok_or_else(|| anyhow::anyhow!("No SBOM documents were given"))?;

        let summary = combined.summary();
        self.progress_reporter.report_completion(&format!(
            "✅ Analyzed {} component(s): {} compatible, {} incompatible, {} need upgrade, {} need verification, {} unknown",
            summary.total_components,
            summary.compatible,
            summary.incompatible,
            summary.needs_upgrade,
            summary.needs_verification + summary.needs_version_verification,
            summary.unknown
        ));
        Ok(combined)
    }

    async fn analyze_document(&self, path: &Path, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let start = Instant::now();
        let source_document = path.display().to_string();

        // Step 1: Read and parse
        let parsed = self.read_and_parse(path, &source_document)?;
        if parsed.components.is_empty() {
            return Err(AnalysisError::EmptyInput { source_document }.into());
        }
        let ParsedSbom {
            components,
            detected_os,
            errors,
        } = parsed;

        // Step 2: OS knowledge base
        let components = Self::annotate_os(components, detected_os.as_deref());
        let context = self.context_for_os(request, detected_os.as_deref());

        // Step 3: Native-code evidence
        let mut evidence = self
            .evidence_collector
            .collect(&components, &self.progress_reporter)
            .await;

        // Step 4: Classification
        self.progress_reporter.report(&format!(
            "🧮 Classifying {} component(s) for {}...",
            components.len(),
            context.target()
        ));
        let evidence_errors = std::mem::take(&mut evidence.errors);
        let classified = tokio::task::spawn_blocking(move || {
            classify_all(&context, components, &evidence)
        })
        .await
        .context("Classification worker stopped unexpectedly")?;

        let result = AnalysisResult::new(
            classified,
            errors,
            start.elapsed(),
            detected_os,
            source_document,
        )
        .with_errors(evidence_errors);

        // Step 5: Runtime evidence
        Ok(self.apply_runtime_evidence(result))
    }

    fn read_and_parse(&self, path: &Path, source_document: &str) -> Result<ParsedSbom> {
        self.progress_reporter
            .report(&format!("📖 Loading SBOM from: {}", path.display()));

        let content = self.reader.read_document(path, "SBOM")?;
        let document: Value =
            serde_json::from_str(&content).map_err(|e| AnalysisError::DocumentLoad {
                document: source_document.to_string(),
                details: e.to_string(),
            })?;

        let format = ParserFactory::detect_format(&document, source_document)?;
        let parsed = ParserFactory::create(format).parse(&document, source_document)?;

        info!(
            document = source_document,
            format = %format,
            components = parsed.components.len(),
            skipped = parsed.errors.len(),
            "Parsed SBOM"
        );
        self.progress_reporter.report(&format!(
            "✅ Detected {} component(s) ({} format)",
            parsed.components.len(),
            format
        ));
        for error in &parsed.errors {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", error.message));
        }
        Ok(parsed)
    }

    fn annotate_os(components: Vec<SoftwareComponent>, detected_os: Option<&str>) -> Vec<SoftwareComponent> {
        match detected_os {
            Some(os) => components
                .into_iter()
                .map(|c| c.with_property(SBOM_DETECTED_OS_PROPERTY, os))
                .collect(),
            None => components,
        }
    }

    /// The shared context, or a copy extended with the OS document when one
    /// exists for `detected_os`. A missing or broken OS document, or an OS
    /// name that is not a safe file name, is not an error.
    fn context_for_os(&self, request: &AnalysisRequest, detected_os: Option<&str>) -> Arc<AnalysisContext> {
        let Some(os) = detected_os else {
            return Arc::clone(&self.context);
        };
        let path = match request.os_knowledge_base_path(os) {
            Ok(Some(path)) => path,
            Ok(None) => return Arc::clone(&self.context),
            Err(e) => {
                warn!(os, error = %e, "Refusing OS knowledge base lookup");
                self.progress_reporter
                    .report_error(&format!("⚠️  Warning: OS knowledge base skipped: {}", e));
                return Arc::clone(&self.context);
            }
        };
        if !path.exists() {
            debug!(os, path = %path.display(), "No OS knowledge base for detected OS");
            return Arc::clone(&self.context);
        }

        let label = path.display().to_string();
        let merged = self
            .reader
            .read_document(&path, "OS knowledge base")
            .and_then(|content| Ok(self.context.with_os_overlay(&label, &content)?));
        match merged {
            Ok(context) => {
                self.progress_reporter
                    .report(&format!("🐧 Loaded OS knowledge base for {}", os));
                Arc::new(context)
            }
            Err(e) => {
                warn!(os, error = %e, "Ignoring OS knowledge base");
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not load OS knowledge base {}: {}",
                    label, e
                ));
                Arc::clone(&self.context)
            }
        }
    }

    fn apply_runtime_evidence(&self, result: AnalysisResult) -> AnalysisResult {
        match &self.runtime_evidence {
            Some(source) => {
                let outcomes = runtime_outcomes(
                    result.components().iter().map(|r| &r.component),
                    source.as_ref(),
                );
                debug!(outcomes = outcomes.len(), "Merging runtime outcomes");
                ResultMerger::merge_all(result, &outcomes)
            }
            None => result,
        }
    }
}

/// Classifies every component with its native-code evidence. Runs on the
/// rayon pool; the result keeps input order.
fn classify_all(
    context: &AnalysisContext,
    components: Vec<SoftwareComponent>,
    evidence: &EvidenceReport,
) -> Vec<ComponentResult> {
    components
        .into_par_iter()
        .map(|component| {
            let native = evidence.get(&component);
            let compatibility = context.classify(&component, native);
            let component = match native {
                Some(native) => component
                    .with_property("native_code_signal", native.signal().as_str())
                    .with_property("native_code_source", native.source.as_str()),
                None => component,
            };
            ComponentResult::new(component, compatibility)
        })
        .collect()
}
