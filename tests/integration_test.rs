/// Integration tests for the application layer
mod test_utilities;

use arm_compat::ports::outbound::EvidenceError;
use arm_compat::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use test_utilities::mocks::*;

const KNOWLEDGE_BASE: &str = r#"{"entries": [
    {"name": "pandas", "aliases": ["python3-pandas"], "compatible": true,
     "minimum_supported_version": "1.4.0", "recommended_version": "2.0.0",
     "notes": "aarch64 wheels since 1.4.0", "confidence": "HIGH"},
    {"name": "numpy", "compatible": true, "confidence": "HIGH"},
    {"name": "intel-mkl", "compatible": true, "confidence": "LOW"}
]}"#;

const DENY_LIST: &str = r#"{"entries": [
    {"pattern": "intel-*", "reason": "Intel-only math kernels"}
]}"#;

fn cyclonedx(components: &[(&str, &str)]) -> String {
    let entries: Vec<String> = components
        .iter()
        .map(|(name, version)| {
            format!(
                r#"{{"type": "library", "name": "{}", "version": "{}"}}"#,
                name, version
            )
        })
        .collect();
    format!(
        r#"{{"bomFormat": "CycloneDX", "specVersion": "1.5", "components": [{}]}}"#,
        entries.join(", ")
    )
}

fn context() -> AnalysisContext {
    let (store, report) =
        KnowledgeBaseStore::load(NameNormalizer::default(), [("kb.json", KNOWLEDGE_BASE)], true);
    assert!(report.errors.is_empty());
    assert!(!report.used_builtin);
    let (deny_list, errors) = DenyListOverlay::load([("deny.json", DENY_LIST)]);
    assert!(errors.is_empty());
    AnalysisContext::new(store, deny_list, Matcher::new(false), TargetArchitecture::Arm64)
}

fn find<'a>(result: &'a AnalysisResult, name: &str) -> &'a ComponentResult {
    result
        .components()
        .iter()
        .find(|r| r.component.name() == name)
        .unwrap_or_else(|| panic!("{} not in result", name))
}

#[tokio::test]
async fn test_pandas_and_obscure_lib_scenario() {
    let reader = MockDocumentReader::new()
        .with_document("old.json", &cyclonedx(&[("pandas", "1.0.0"), ("obscure-lib", "9.9")]))
        .with_document("new.json", &cyclonedx(&[("pandas", "1.5.0")]));
    let progress_reporter = MockProgressReporter::new();
    let use_case = AnalyzeSbomUseCase::new(reader, progress_reporter.clone(), context());

    let request = AnalysisRequest::new(vec![PathBuf::from("old.json"), PathBuf::from("new.json")]);
    let result = use_case.execute(request).await.unwrap();

    let statuses: Vec<(&str, &str, CompatibilityStatus)> = result
        .components()
        .iter()
        .map(|r| (r.component.name(), r.component.version(), r.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("pandas", "1.0.0", CompatibilityStatus::NeedsUpgrade),
            ("obscure-lib", "9.9", CompatibilityStatus::Unknown),
            ("pandas", "1.5.0", CompatibilityStatus::Compatible),
        ]
    );

    let old_pandas = &result.components()[0].compatibility;
    assert!(!old_pandas.current_version_supported);
    assert_eq!(old_pandas.recommended_version.as_deref(), Some("2.0.0"));
    assert_eq!(old_pandas.confidence_level, Confidence::High);

    let obscure = &find(&result, "obscure-lib").compatibility;
    assert_eq!(obscure.confidence_level, Confidence::Low);

    let summary = result.summary();
    assert_eq!(summary.total_components, 3);
    assert_eq!(summary.compatible, 1);
    assert_eq!(summary.needs_upgrade, 1);
    assert_eq!(summary.unknown, 1);
    assert_eq!(result.source_document(), "old.json, new.json");
    assert!(progress_reporter.message_count() > 0);
}

#[tokio::test]
async fn test_runtime_pass_promotes_unknown_component() {
    let reader = MockDocumentReader::new()
        .with_document("sbom.json", &cyclonedx(&[("obscure-lib", "9.9"), ("pandas", "1.0.0")]));
    let runtime = MockRuntimeEvidence::new()
        .with_pass("obscure-lib")
        .with_pass("pandas");
    let use_case = AnalyzeSbomUseCase::new(reader, MockProgressReporter::new(), context())
        .with_runtime_evidence(Box::new(runtime));

    let result = use_case
        .execute(AnalysisRequest::new(vec![PathBuf::from("sbom.json")]))
        .await
        .unwrap();

    let obscure = find(&result, "obscure-lib");
    assert_eq!(obscure.status(), CompatibilityStatus::Compatible);
    assert_eq!(obscure.compatibility.confidence_level, Confidence::Medium);
    assert!(obscure.compatibility.current_version_supported);

    // a passing runtime test does not make an upgrade unnecessary
    assert_eq!(find(&result, "pandas").status(), CompatibilityStatus::NeedsUpgrade);
    assert_eq!(result.summary().compatible, 1);
}

#[tokio::test]
async fn test_deny_list_beats_runtime_pass() {
    let reader =
        MockDocumentReader::new().with_document("sbom.json", &cyclonedx(&[("intel-mkl", "2023.1")]));
    let runtime = MockRuntimeEvidence::new().with_pass("intel-mkl");
    let use_case = AnalyzeSbomUseCase::new(reader, MockProgressReporter::new(), context())
        .with_runtime_evidence(Box::new(runtime));

    let result = use_case
        .execute(AnalysisRequest::new(vec![PathBuf::from("sbom.json")]))
        .await
        .unwrap();

    let mkl = find(&result, "intel-mkl");
    assert_eq!(mkl.status(), CompatibilityStatus::Incompatible);
    assert_eq!(mkl.compatibility.confidence_level, Confidence::High);
    assert_eq!(mkl.compatibility.notes, "Intel-only math kernels");
    assert!(result.has_incompatible());
}

#[tokio::test]
async fn test_runtime_failure_forces_incompatible() {
    let reader =
        MockDocumentReader::new().with_document("sbom.json", &cyclonedx(&[("pandas", "1.5.0")]));
    let runtime = MockRuntimeEvidence::new().with_fail("pandas", "Illegal instruction");
    let use_case = AnalyzeSbomUseCase::new(reader, MockProgressReporter::new(), context())
        .with_runtime_evidence(Box::new(runtime));

    let result = use_case
        .execute(AnalysisRequest::new(vec![PathBuf::from("sbom.json")]))
        .await
        .unwrap();

    let pandas = find(&result, "pandas");
    assert_eq!(pandas.status(), CompatibilityStatus::Incompatible);
    assert!(pandas.compatibility.notes.contains("Illegal instruction"));
    assert_eq!(result.summary().incompatible, 1);
}

#[tokio::test]
async fn test_native_evidence_and_inspection_failures() {
    let reader = MockDocumentReader::new().with_document(
        "sbom.json",
        &cyclonedx(&[("numpy", "1.26.0"), ("pandas", "1.5.0"), ("obscure-lib", "9.9")]),
    );
    let inspector = Arc::new(
        MockInspector::new()
            .with_foreign_binaries("numpy")
            .with_failure("pandas", EvidenceError::permanent("archive is corrupt"))
            .with_failure("obscure-lib", EvidenceError::validation("not a Maven artifact")),
    );
    let settings = EvidenceSettings {
        max_retries: 0,
        ..EvidenceSettings::default()
    };
    let collector = EvidenceCollector::new(settings).with_inspector(inspector.clone());
    let use_case = AnalyzeSbomUseCase::new(reader, MockProgressReporter::new(), context())
        .with_evidence_collector(collector);

    let result = use_case
        .execute(AnalysisRequest::new(vec![PathBuf::from("sbom.json")]))
        .await
        .unwrap();

    assert_eq!(inspector.call_count(), 3);
    assert_eq!(
        find(&result, "numpy").status(),
        CompatibilityStatus::NeedsVersionVerification
    );
    // a failed inspection leaves the static verdict alone
    assert_eq!(find(&result, "pandas").status(), CompatibilityStatus::Compatible);
    assert_eq!(find(&result, "obscure-lib").status(), CompatibilityStatus::Unknown);

    // permanent failures are recorded, validation failures are dropped
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].message.contains("archive is corrupt"));
}

#[tokio::test]
async fn test_empty_document_is_fatal() {
    let reader = MockDocumentReader::new().with_document("empty.json", &cyclonedx(&[]));
    let use_case = AnalyzeSbomUseCase::new(reader, MockProgressReporter::new(), context());

    let err = use_case
        .execute(AnalysisRequest::new(vec![PathBuf::from("empty.json")]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No components to analyze"));
}

#[tokio::test]
async fn test_missing_document_is_an_error() {
    let use_case =
        AnalyzeSbomUseCase::new(MockDocumentReader::new(), MockProgressReporter::new(), context());

    let result = use_case
        .execute(AnalysisRequest::new(vec![PathBuf::from("absent.json")]))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_merge_recombines_written_reports() {
    let reader = MockDocumentReader::new()
        .with_document("a.json", &cyclonedx(&[("pandas", "1.0.0"), ("obscure-lib", "9.9")]))
        .with_document("b.json", &cyclonedx(&[("numpy", "1.26.0")]));
    let use_case = AnalyzeSbomUseCase::new(reader, MockProgressReporter::new(), context());

    let mut reports = MockDocumentReader::new();
    for name in ["a.json", "b.json"] {
        let result = use_case
            .execute(AnalysisRequest::new(vec![PathBuf::from(name)]))
            .await
            .unwrap();
        let model = ReportReadModelBuilder::build(&result, TargetArchitecture::Arm64);
        let json = JsonReportFormatter::new().format(&model).unwrap();
        reports = reports.with_document(&format!("report-{}", name), &json);
    }

    let progress_reporter = MockProgressReporter::new();
    let merge = MergeReportsUseCase::new(reports, progress_reporter.clone())
        .with_runtime_evidence(Box::new(MockRuntimeEvidence::new().with_pass("obscure-lib")));
    let merged = merge
        .execute(&[
            PathBuf::from("report-a.json"),
            PathBuf::from("report-b.json"),
        ])
        .unwrap();

    let names: Vec<&str> = merged.components().iter().map(|r| r.component.name()).collect();
    assert_eq!(names, vec!["pandas", "obscure-lib", "numpy"]);

    let summary = merged.summary();
    assert_eq!(summary.total_components, 3);
    assert_eq!(summary.compatible, 2);
    assert_eq!(summary.needs_upgrade, 1);
    assert_eq!(summary.unknown, 0);
    assert_eq!(
        find(&merged, "obscure-lib").compatibility.confidence_level,
        Confidence::Medium
    );
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Merged 2 report(s)")));
}
