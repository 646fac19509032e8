use crate::compatibility::domain::{NativeCodeEvidence, RuntimeOutcome, SoftwareComponent};
use crate::compatibility::policies::ErrorKind;
use async_trait::async_trait;
use thiserror::Error;

/// Failure raised by an evidence producer, classified for the retry policy
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct EvidenceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl EvidenceError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transient, message)
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Permanent, message)
    }

    pub fn throttled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Throttled, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }
}

/// NativeCodeInspector port for looking inside a component's packaged
/// artifact (jar, wheel, zip) for native binaries
///
/// # Async Support
/// Inspections run concurrently under a bounded limit; implementations must
/// be `Send + Sync`.
#[async_trait]
pub trait NativeCodeInspector: Send + Sync {
    /// Inspects the artifact matching `component`
    ///
    /// # Returns
    /// `Ok(None)` when no artifact is available for the component
    ///
    /// # Errors
    /// Returns a classified [`EvidenceError`] when an artifact exists but
    /// cannot be inspected
    async fn inspect(
        &self,
        component: &SoftwareComponent,
    ) -> Result<Option<NativeCodeEvidence>, EvidenceError>;
}

/// PackageLookup port for querying a package registry about a release
///
/// This is the only way the engine reaches the network.
#[async_trait]
pub trait PackageLookup: Send + Sync {
    /// Returns the build classifiers published for the component's release
    /// (for Maven: `linux-aarch_64`, `natives-linux-arm64`, ...)
    ///
    /// # Errors
    /// Returns [`ErrorKind::Validation`] for components the registry does not
    /// serve, and a transient, throttled or permanent error for failed calls
    async fn published_classifiers(
        &self,
        component: &SoftwareComponent,
    ) -> Result<Vec<String>, EvidenceError>;
}

/// RuntimeEvidenceSource port serving runtime test outcomes per component
pub trait RuntimeEvidenceSource {
    /// Outcome recorded for `component`, or `None` when it was never tested
    fn outcome(&self, component: &SoftwareComponent) -> Option<RuntimeOutcome>;
}
