use crate::application::dto::EvidenceSettings;
use crate::compatibility::domain::{ErrorRecord, NativeCodeEvidence, SoftwareComponent};
use crate::compatibility::policies::{policy, retry_delay, ErrorPolicy};
use crate::ports::outbound::{EvidenceError, NativeCodeInspector, ProgressReporter};
use crate::shared::error::AnalysisError;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Native-code evidence gathered for one batch of components
#[derive(Debug, Default)]
pub struct EvidenceReport {
    /// Keyed by [`SoftwareComponent::identity_key`]
    pub evidence: HashMap<String, NativeCodeEvidence>,
    /// One record per component whose inspection failed, in component order
    pub errors: Vec<ErrorRecord>,
}

impl EvidenceReport {
    pub fn get(&self, component: &SoftwareComponent) -> Option<&NativeCodeEvidence> {
        self.evidence.get(&component.identity_key())
    }
}

/// What a single inspector call came to after the error policy ran
enum Inspection {
    Found(NativeCodeEvidence),
    Absent,
    Dropped,
    Failed(String),
}

/// EvidenceCollector - runs native-code inspectors over a component list
///
/// Inspectors are tried in order for each component; the first one that
/// returns evidence wins. Components are processed concurrently up to
/// `max_concurrency`, every call is bounded by `timeout`, and failures go
/// through the [`ErrorPolicy`] table. A failure never aborts the batch: the
/// component simply ends up without evidence.
#[derive(Clone, Default)]
pub struct EvidenceCollector {
    inspectors: Vec<Arc<dyn NativeCodeInspector>>,
    settings: EvidenceSettings,
}

impl EvidenceCollector {
    pub fn new(settings: EvidenceSettings) -> Self {
        Self {
            inspectors: Vec::new(),
            settings,
        }
    }

    pub fn with_inspector(mut self, inspector: Arc<dyn NativeCodeInspector>) -> Self {
        self.inspectors.push(inspector);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.inspectors.is_empty()
    }

    pub async fn collect<PR: ProgressReporter>(
        &self,
        components: &[SoftwareComponent],
        progress_reporter: &PR,
    ) -> EvidenceReport {
        let mut report = EvidenceReport::default();
        if self.inspectors.is_empty() || components.is_empty() {
            return report;
        }

        progress_reporter.report(&format!(
            "🔎 Collecting native code evidence for {} component(s)...",
            components.len()
        ));

        let total = components.len();
        let mut inspections = stream::iter(components.iter().enumerate().map(
            |(index, component)| async move { (index, self.inspect_component(component).await) },
        ))
        .buffer_unordered(self.settings.max_concurrency.max(1));

        let mut failures: Vec<(usize, ErrorRecord)> = Vec::new();
        let mut completed = 0;
        while let Some((index, (evidence, failure))) = inspections.next().await {
            completed += 1;
            let component = &components[index];
            progress_reporter.report_progress(completed, total, Some(component.name()));

            if let Some(evidence) = evidence {
                report.evidence.insert(component.identity_key(), evidence);
            }
            if let Some(details) = failure {
                let error = AnalysisError::EvidenceUnavailable {
                    component_ref: component.to_string(),
                    details,
                };
                failures.push((index, ErrorRecord::new(component.to_string(), error.to_string())));
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        report.errors = failures.into_iter().map(|(_, record)| record).collect();

        progress_reporter.report(&format!(
            "✅ Native code evidence found for {} component(s)",
            report.evidence.len()
        ));
        report
    }

    /// Evidence from the first inspector that has some, plus the last
    /// recorded failure if no inspector produced evidence.
    async fn inspect_component(
        &self,
        component: &SoftwareComponent,
    ) -> (Option<NativeCodeEvidence>, Option<String>) {
        let mut failure = None;
        for inspector in &self.inspectors {
            match self.inspect_with_policy(inspector.as_ref(), component).await {
                Inspection::Found(evidence) => return (Some(evidence), None),
                Inspection::Absent | Inspection::Dropped => {}
                Inspection::Failed(details) => failure = Some(details),
            }
        }
        (None, failure)
    }

    async fn inspect_with_policy(
        &self,
        inspector: &dyn NativeCodeInspector,
        component: &SoftwareComponent,
    ) -> Inspection {
        let mut attempt = 0;
        loop {
            let outcome = tokio::time::timeout(self.settings.timeout, inspector.inspect(component))
                .await
                .unwrap_or_else(|_| {
                    Err(EvidenceError::transient(format!(
                        "timed out after {}s",
                        self.settings.timeout.as_secs_f64()
                    )))
                });

            let error = match outcome {
                Ok(Some(evidence)) => return Inspection::Found(evidence),
                Ok(None) => return Inspection::Absent,
                Err(error) => error,
            };

            match policy(error.kind) {
                ErrorPolicy::Retry if attempt < self.settings.max_retries => {
                    let delay = retry_delay(error.kind, attempt);
                    debug!(
                        component = %component,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying evidence lookup"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                ErrorPolicy::Drop => {
                    debug!(component = %component, error = %error, "Evidence not applicable");
                    return Inspection::Dropped;
                }
                ErrorPolicy::Retry | ErrorPolicy::Fail => {
                    warn!(component = %component, error = %error, "Evidence unavailable");
                    return Inspection::Failed(error.message);
                }
            }
        }
    }
}
