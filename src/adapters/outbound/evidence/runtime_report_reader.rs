use crate::compatibility::domain::{RuntimeOutcome, SoftwareComponent};
use crate::ports::outbound::RuntimeEvidenceSource;
use crate::shared::error::AnalysisError;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RuntimeResultsDocument {
    results: Vec<RuntimeResultEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeLabel {
    Pass,
    Fail,
    NotAttempted,
}

#[derive(Debug, Deserialize)]
struct RuntimeResultEntry {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    origin_identifier: Option<String>,
    outcome: OutcomeLabel,
    #[serde(default)]
    details: Option<String>,
}

impl RuntimeResultEntry {
    /// Identity key, the `name@version` key when the entry names no origin,
    /// and the outcome.
    fn into_outcome(self) -> (String, Option<String>, RuntimeOutcome) {
        let loose = format!("{}@{}", self.name.trim(), self.version.trim());
        let origin = self
            .origin_identifier
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty());
        let exact = format!("{}#{}", loose, origin.unwrap_or(""));
        let loose = origin.is_none().then_some(loose);
        let outcome = match self.outcome {
            OutcomeLabel::Pass => RuntimeOutcome::Pass,
            OutcomeLabel::Fail => RuntimeOutcome::Fail {
                evidence: self.details.unwrap_or_default(),
            },
            OutcomeLabel::NotAttempted => RuntimeOutcome::NotAttempted,
        };
        (exact, loose, outcome)
    }
}

/// RuntimeReportReader adapter serving runtime test outcomes from result documents
///
/// Documents are applied in order, so a later document overrides an earlier
/// one for the same component. Lookup tries `name@version#origin` first and
/// falls back to `name@version`, but only for entries that name no origin: an
/// entry for `pkg:npm/core@1.0.0` never answers for `pkg:nuget/core@1.0.0`.
#[derive(Debug, Default)]
pub struct RuntimeReportReader {
    exact: HashMap<String, RuntimeOutcome>,
    by_name_version: HashMap<String, RuntimeOutcome>,
}

impl RuntimeReportReader {
    /// Loads runtime result documents. A document that fails to parse is
    /// skipped and reported.
    pub fn from_documents<I, L, C>(documents: I) -> (Self, Vec<AnalysisError>)
    where
        I: IntoIterator<Item = (L, C)>,
        L: AsRef<str>,
        C: AsRef<str>,
    {
        let mut reader = Self::default();
        let mut errors = Vec::new();

        for (label, content) in documents {
            let label = label.as_ref();
            let document: RuntimeResultsDocument = match serde_json::from_str(content.as_ref()) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(document = label, error = %e, "Skipping runtime results document");
                    errors.push(AnalysisError::DocumentLoad {
                        document: label.to_string(),
                        details: e.to_string(),
                    });
                    continue;
                }
            };

            let count = document.results.len();
            for entry in document.results {
                let (exact, loose, outcome) = entry.into_outcome();
                if let Some(loose) = loose {
                    reader.by_name_version.insert(loose, outcome.clone());
                }
                reader.exact.insert(exact, outcome);
            }
            info!(document = label, results = count, "Loaded runtime results");
        }

        (reader, errors)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

impl RuntimeEvidenceSource for RuntimeReportReader {
    fn outcome(&self, component: &SoftwareComponent) -> Option<RuntimeOutcome> {
        self.exact
            .get(&component.identity_key())
            .or_else(|| {
                self.by_name_version
                    .get(&format!("{}@{}", component.name(), component.version()))
            })
            .cloned()
    }
}
