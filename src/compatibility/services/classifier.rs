use crate::compatibility::domain::{
    CompatibilityRecord, CompatibilityResult, CompatibilityStatus, DenyEntry, NativeCodeEvidence,
    NativeSignal, SoftwareComponent, TargetArchitecture,
};
use crate::compatibility::services::VersionComparator;
use std::cmp::Ordering;

/// CompatibilityClassifier - turns lookup results into a verdict
///
/// Pure function of its inputs:
/// 1. a deny-list hit is terminal: INCOMPATIBLE, HIGH, the deny reason as notes
/// 2. no record: UNKNOWN, LOW
/// 3. a record: INCOMPATIBLE when flagged incompatible, COMPATIBLE when the
///    current version meets the minimum, NEEDS_UPGRADE when a newer
///    recommended version exists, NEEDS_VERIFICATION otherwise
/// 4. native-code evidence may then adjust the status (see `apply_evidence`)
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityClassifier {
    target: TargetArchitecture,
}

impl CompatibilityClassifier {
    pub fn new(target: TargetArchitecture) -> Self {
        Self { target }
    }

    pub fn classify(
        &self,
        component: &SoftwareComponent,
        record: Option<&CompatibilityRecord>,
        deny: Option<&DenyEntry>,
        evidence: Option<&NativeCodeEvidence>,
    ) -> CompatibilityResult {
        if let Some(entry) = deny {
            return CompatibilityResult::denied(entry.reason.clone());
        }

        let result = match record {
            Some(record) => Self::classify_record(component.version(), record),
            None => CompatibilityResult::unknown(),
        };

        match evidence {
            Some(evidence) => self.apply_evidence(result, evidence),
            None => result,
        }
    }

    fn classify_record(version: &str, record: &CompatibilityRecord) -> CompatibilityResult {
        let current_version_supported = record
            .minimum_supported_version
            .as_deref()
            .map_or(true, |minimum| VersionComparator::is_at_least(version, minimum));

        let upgrade_available = record
            .recommended_version
            .as_deref()
            .is_some_and(|recommended| {
                VersionComparator::compare(recommended, version) == Ordering::Greater
            });

        let status = if !record.compatible {
            CompatibilityStatus::Incompatible
        } else if current_version_supported {
            CompatibilityStatus::Compatible
        } else if upgrade_available {
            CompatibilityStatus::NeedsUpgrade
        } else {
            CompatibilityStatus::NeedsVerification
        };

        CompatibilityResult {
            status,
            current_version_supported,
            minimum_supported_version: record.minimum_supported_version.clone(),
            recommended_version: record.recommended_version.clone(),
            notes: record.notes.clone(),
            confidence_level: record.confidence,
            deny_listed: false,
        }
    }

    /// Foreign-only binaries cast doubt on COMPATIBLE and NEEDS_VERIFICATION;
    /// target-only binaries lift UNKNOWN to NEEDS_VERIFICATION. Confidence is
    /// left as it was.
    fn apply_evidence(
        &self,
        result: CompatibilityResult,
        evidence: &NativeCodeEvidence,
    ) -> CompatibilityResult {
        match (evidence.signal(), result.status) {
            (
                NativeSignal::ForeignOnly,
                CompatibilityStatus::Compatible | CompatibilityStatus::NeedsVerification,
            ) => {
                let note = evidence.describe(self.target);
                CompatibilityResult {
                    status: CompatibilityStatus::NeedsVersionVerification,
                    ..result
                }
                .with_note(&note)
            }
            (NativeSignal::TargetOnly, CompatibilityStatus::Unknown) => {
                let note = format!(
                    "No knowledge base entry, but {}",
                    evidence.describe(self.target)
                );
                CompatibilityResult {
                    status: CompatibilityStatus::NeedsVerification,
                    ..result
                }
                .with_note(&note)
            }
            _ => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::domain::{ComponentType, Confidence};

    fn component(name: &str, version: &str) -> SoftwareComponent {
        SoftwareComponent::new(name, version, ComponentType::Library, "sbom.json").unwrap()
    }

    fn pandas_record() -> CompatibilityRecord {
        CompatibilityRecord::new("pandas", true, Confidence::High)
            .with_minimum_version("1.4.0")
            .with_recommended_version("2.0.0")
            .with_notes("aarch64 wheels available")
    }

    fn evidence(target: bool, foreign: bool) -> NativeCodeEvidence {
        NativeCodeEvidence {
            has_native_code: true,
            native_files: vec!["lib/libx.so".to_string()],
            target_specific: target,
            foreign_specific: foreign,
            source: "x.jar".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deny_entry_is_terminal() {
        let classifier = CompatibilityClassifier::default();
        let deny = DenyEntry::new("pandas", "vendor build is x86 only");
        let result = classifier.classify(
            &component("pandas", "1.5.0"),
            Some(&pandas_record()),
            Some(&deny),
            Some(&evidence(true, false)),
        );
        assert_eq!(result.status, CompatibilityStatus::Incompatible);
        assert_eq!(result.confidence_level, Confidence::High);
        assert_eq!(result.notes, "vendor build is x86 only");
        assert!(result.deny_listed);
    }

    #[test]
    fn test_no_record_is_unknown_low() {
        let result =
            CompatibilityClassifier::default().classify(&component("obscure-lib", "9.9"), None, None, None);
        assert_eq!(result.status, CompatibilityStatus::Unknown);
        assert_eq!(result.confidence_level, Confidence::Low);
        assert!(!result.current_version_supported);
    }

    #[test]
    fn test_supported_version_is_compatible() {
        let result = CompatibilityClassifier::default().classify(
            &component("pandas", "1.5.0"),
            Some(&pandas_record()),
            None,
            None,
        );
        assert_eq!(result.status, CompatibilityStatus::Compatible);
        assert!(result.current_version_supported);
        assert_eq!(result.confidence_level, Confidence::High);
        assert_eq!(result.minimum_supported_version.as_deref(), Some("1.4.0"));
        assert_eq!(result.notes, "aarch64 wheels available");
    }

    #[test]
    fn test_old_version_needs_upgrade() {
        let result = CompatibilityClassifier::default().classify(
            &component("pandas", "1.0.0"),
            Some(&pandas_record()),
            None,
            None,
        );
        assert_eq!(result.status, CompatibilityStatus::NeedsUpgrade);
        assert!(!result.current_version_supported);
        assert_eq!(result.recommended_version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_old_version_without_recommendation_needs_verification() {
        let record = CompatibilityRecord::new("lib", true, Confidence::Medium).with_minimum_version("2.0");
        let result =
            CompatibilityClassifier::default().classify(&component("lib", "1.0"), Some(&record), None, None);
        assert_eq!(result.status, CompatibilityStatus::NeedsVerification);
    }

    #[test]
    fn test_recommended_not_newer_needs_verification() {
        let record = CompatibilityRecord::new("lib", true, Confidence::Medium)
            .with_minimum_version("3.0")
            .with_recommended_version("1.0");
        let result =
            CompatibilityClassifier::default().classify(&component("lib", "2.0"), Some(&record), None, None);
        assert_eq!(result.status, CompatibilityStatus::NeedsVerification);
    }

    #[test]
    fn test_no_minimum_means_supported() {
        let record = CompatibilityRecord::new("lib", true, Confidence::Low);
        let result =
            CompatibilityClassifier::default().classify(&component("lib", "0.0.1"), Some(&record), None, None);
        assert_eq!(result.status, CompatibilityStatus::Compatible);
        assert!(result.current_version_supported);
        assert_eq!(result.confidence_level, Confidence::Low);
    }

    #[test]
    fn test_incompatible_record() {
        let record = CompatibilityRecord::new("lib", false, Confidence::High).with_notes("no port");
        let result =
            CompatibilityClassifier::default().classify(&component("lib", "1.0"), Some(&record), None, None);
        assert_eq!(result.status, CompatibilityStatus::Incompatible);
        assert!(!result.deny_listed);
    }

    #[test]
    fn test_foreign_only_binaries_downgrade_compatible() {
        let result = CompatibilityClassifier::default().classify(
            &component("pandas", "1.5.0"),
            Some(&pandas_record()),
            None,
            Some(&evidence(false, true)),
        );
        assert_eq!(result.status, CompatibilityStatus::NeedsVersionVerification);
        assert_eq!(result.confidence_level, Confidence::High);
        assert!(result.notes.starts_with("aarch64 wheels available; "));
        assert!(result.notes.contains("x.jar"));
    }

    #[test]
    fn test_foreign_only_binaries_leave_upgrade_alone() {
        let result = CompatibilityClassifier::default().classify(
            &component("pandas", "1.0.0"),
            Some(&pandas_record()),
            None,
            Some(&evidence(false, true)),
        );
        assert_eq!(result.status, CompatibilityStatus::NeedsUpgrade);
    }

    #[test]
    fn test_target_only_binaries_lift_unknown() {
        let result = CompatibilityClassifier::default().classify(
            &component("obscure-lib", "9.9"),
            None,
            None,
            Some(&evidence(true, false)),
        );
        assert_eq!(result.status, CompatibilityStatus::NeedsVerification);
        assert_eq!(result.confidence_level, Confidence::Low);
        assert!(result.notes.contains("No knowledge base entry"));
    }

    #[test]
    fn test_mixed_binaries_change_nothing() {
        let result = CompatibilityClassifier::default().classify(
            &component("obscure-lib", "9.9"),
            None,
            None,
            Some(&evidence(true, true)),
        );
        assert_eq!(result.status, CompatibilityStatus::Unknown);
        assert!(result.notes.is_empty());
    }
}
