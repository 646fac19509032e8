use arm_compat::compatibility::domain::NativeCodeEvidence;
use arm_compat::ports::outbound::EvidenceError;
use arm_compat::prelude::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock NativeCodeInspector returning canned evidence by component name
#[derive(Default)]
pub struct MockInspector {
    evidence: HashMap<String, NativeCodeEvidence>,
    failures: HashMap<String, EvidenceError>,
    calls: AtomicUsize,
}

impl MockInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evidence of native binaries built only for the other architecture
    pub fn with_foreign_binaries(mut self, name: &str) -> Self {
        self.evidence.insert(
            name.to_string(),
            NativeCodeEvidence {
                has_native_code: true,
                native_files: vec![format!("linux-x86-64/lib{}.so", name)],
                foreign_specific: true,
                source: format!("{}.jar", name),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_failure(mut self, name: &str, error: EvidenceError) -> Self {
        self.failures.insert(name.to_string(), error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NativeCodeInspector for MockInspector {
    async fn inspect(
        &self,
        component: &SoftwareComponent,
    ) -> std::result::Result<Option<NativeCodeEvidence>, EvidenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failures.get(component.name()) {
            return Err(error.clone());
        }
        Ok(self.evidence.get(component.name()).cloned())
    }
}
