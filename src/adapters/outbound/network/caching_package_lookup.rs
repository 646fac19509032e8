use crate::compatibility::domain::SoftwareComponent;
use crate::ports::outbound::{EvidenceError, PackageLookup};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingPackageLookup wraps a PackageLookup and adds in-memory caching.
///
/// Keyed by `name@version#origin`, so the same release listed in several
/// SBOMs is looked up once per run. Only successful lookups are cached; a
/// failure is retried on the next request.
pub struct CachingPackageLookup<L: PackageLookup> {
    inner: L,
    cache: Arc<DashMap<String, Vec<String>>>,
}

impl<L: PackageLookup> CachingPackageLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<L: PackageLookup> PackageLookup for CachingPackageLookup<L> {
    async fn published_classifiers(
        &self,
        component: &SoftwareComponent,
    ) -> Result<Vec<String>, EvidenceError> {
        let key = component.identity_key();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let classifiers = self.inner.published_classifiers(component).await?;
        self.cache.insert(key, classifiers.clone());
        Ok(classifiers)
    }
}
