use crate::compatibility::domain::{NativeCodeEvidence, SoftwareComponent};
use crate::compatibility::services::NativeCodeScanner;
use crate::ports::outbound::{EvidenceError, NativeCodeInspector, PackageLookup};
use async_trait::async_trait;

/// RegistryInspector adapter turning published build variants into evidence
///
/// Asks a [`PackageLookup`] which classifiers a release publishes. Any
/// classifier built for the target architecture yields target-only evidence;
/// otherwise the inspector has nothing to say.
pub struct RegistryInspector<L: PackageLookup> {
    lookup: L,
    scanner: NativeCodeScanner,
    registry: String,
}

impl<L: PackageLookup> RegistryInspector<L> {
    pub fn new(lookup: L, scanner: NativeCodeScanner, registry: impl Into<String>) -> Self {
        Self {
            lookup,
            scanner,
            registry: registry.into(),
        }
    }
}

#[async_trait]
impl<L: PackageLookup> NativeCodeInspector for RegistryInspector<L> {
    async fn inspect(
        &self,
        component: &SoftwareComponent,
    ) -> Result<Option<NativeCodeEvidence>, EvidenceError> {
        let classifiers = self.lookup.published_classifiers(component).await?;
        Ok(self
            .scanner
            .from_published_classifiers(&classifiers, &self.registry))
    }
}
