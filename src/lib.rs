//! arm-compat - architecture compatibility analysis for SBOMs
//!
//! This library classifies the components of an SBOM (CycloneDX, SPDX or
//! Syft JSON) against compatibility knowledge bases for an arm64/aarch64
//! target, following hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`compatibility`): Pure classification logic, the
//!   knowledge base, the deny list and domain models
//! - **Application Layer** (`application`): Use cases, DTOs, factories and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use arm_compat::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! // Build the read-only analysis context
//! let (store, _) = KnowledgeBaseStore::load(
//!     NameNormalizer::default(),
//!     Vec::<(String, String)>::new(),
//!     true,
//! );
//! let context = AnalysisContext::new(
//!     store,
//!     DenyListOverlay::default(),
//!     Matcher::new(false),
//!     TargetArchitecture::Arm64,
//! );
//!
//! // Create use case
//! let use_case = AnalyzeSbomUseCase::new(
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//!     context,
//! );
//!
//! // Execute
//! let request = AnalysisRequest::new(vec![PathBuf::from("sbom.cdx.json")]);
//! let result = use_case.execute(request).await?;
//!
//! // Format output
//! let model = ReportReadModelBuilder::build(&result, TargetArchitecture::Arm64);
//! let output = MarkdownReportFormatter::new().format(&model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod compatibility;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::evidence::{
        RegistryInspector, RuntimeReportReader, ZipArchiveInspector,
    };
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonReportFormatter, MarkdownReportFormatter,
    };
    pub use crate::application::context::AnalysisContext;
    pub use crate::application::dto::{AnalysisRequest, EvidenceSettings, OutputFormat};
    pub use crate::application::read_models::{ReportReadModel, ReportReadModelBuilder};
    pub use crate::application::use_cases::{
        AnalyzeSbomUseCase, EvidenceCollector, MergeReportsUseCase,
    };
    pub use crate::compatibility::domain::{
        AnalysisResult, AnalysisSummary, CompatibilityRecord, CompatibilityResult,
        CompatibilityStatus, ComponentResult, ComponentType, Confidence, DenyEntry,
        SoftwareComponent, TargetArchitecture,
    };
    pub use crate::compatibility::services::{
        DenyListOverlay, KnowledgeBaseStore, Matcher, NameNormalizer, ResultMerger,
    };
    pub use crate::ports::outbound::{
        DocumentReader, NativeCodeInspector, OutputPresenter, ProgressReporter, ReportFormatter,
        RuntimeEvidenceSource,
    };
    pub use crate::shared::Result;
}
