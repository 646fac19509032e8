use crate::compatibility::domain::{
    AnalysisResult, CompatibilityResult, CompatibilityStatus, ComponentResult, Confidence,
    RuntimeOutcome,
};
use std::collections::HashMap;
use std::time::Duration;

/// Note appended when a runtime test confirms a component
pub const RUNTIME_PASS_NOTE: &str = "Runtime test passed on target architecture";

/// ResultMerger - folds runtime outcomes into static verdicts
///
/// `merge` is a pure function of the verdict and the outcome, and applying
/// the same outcome twice gives the same result as applying it once.
///
/// A deny-listed INCOMPATIBLE is never overridden by a runtime pass: the deny
/// list records an operator decision, not a lack of evidence.
pub struct ResultMerger;

impl ResultMerger {
    pub fn merge(result: ComponentResult, outcome: Option<&RuntimeOutcome>) -> ComponentResult {
        let ComponentResult {
            component,
            compatibility,
        } = result;

        let compatibility = match outcome {
            None | Some(RuntimeOutcome::NotAttempted) => compatibility,
            Some(RuntimeOutcome::Pass) => Self::apply_pass(compatibility),
            Some(RuntimeOutcome::Fail { evidence }) => Self::apply_fail(compatibility, evidence),
        };

        ComponentResult::new(component, compatibility)
    }

    /// Merges every component against `outcomes`, keyed by
    /// [`SoftwareComponent::identity_key`](crate::compatibility::domain::SoftwareComponent::identity_key).
    /// Counters of the returned result are re-derived from the new list.
    pub fn merge_all(
        analysis: AnalysisResult,
        outcomes: &HashMap<String, RuntimeOutcome>,
    ) -> AnalysisResult {
        let components: Vec<ComponentResult> = analysis
            .components()
            .iter()
            .cloned()
            .map(|result| {
                let outcome = outcomes.get(&result.component.identity_key());
                Self::merge(result, outcome)
            })
            .collect();
        analysis.with_components(components)
    }

    /// Concatenates per-document results in order. Returns `None` for an
    /// empty input.
    pub fn combine(results: Vec<AnalysisResult>) -> Option<AnalysisResult> {
        if results.is_empty() {
            return None;
        }

        let detected_os = results
            .iter()
            .find_map(|r| r.detected_os().map(str::to_string));
        let source_document = results
            .iter()
            .map(|r| r.source_document().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let processing_time: Duration = results.iter().map(|r| r.processing_time()).sum();

        let mut components = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            let (c, e) = result.into_parts();
            components.extend(c);
            errors.extend(e);
        }

        Some(AnalysisResult::new(
            components,
            errors,
            processing_time,
            detected_os,
            source_document,
        ))
    }

    fn apply_pass(result: CompatibilityResult) -> CompatibilityResult {
        if result.deny_listed {
            return result;
        }

        let promote = matches!(
            result.status,
            CompatibilityStatus::Unknown
                | CompatibilityStatus::NeedsVerification
                | CompatibilityStatus::NeedsVersionVerification
        );

        let confidence_level = result.confidence_level.max(Confidence::Medium);
        let merged = if promote {
            CompatibilityResult {
                status: CompatibilityStatus::Compatible,
                current_version_supported: true,
                confidence_level,
                ..result
            }
        } else {
            CompatibilityResult {
                confidence_level,
                ..result
            }
        };
        merged.with_note(RUNTIME_PASS_NOTE)
    }

    fn apply_fail(result: CompatibilityResult, evidence: &str) -> CompatibilityResult {
        let note = if evidence.trim().is_empty() {
            "Runtime test failed on target architecture".to_string()
        } else {
            format!("Runtime test failed on target architecture: {}", evidence.trim())
        };

        CompatibilityResult {
            status: CompatibilityStatus::Incompatible,
            current_version_supported: false,
            confidence_level: Confidence::High,
            ..result
        }
        .with_note(&note)
    }
}
