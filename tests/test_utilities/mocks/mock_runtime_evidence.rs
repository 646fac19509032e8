use arm_compat::compatibility::domain::RuntimeOutcome;
use arm_compat::prelude::*;
use std::collections::HashMap;

/// Mock RuntimeEvidenceSource keyed by component name
#[derive(Default)]
pub struct MockRuntimeEvidence {
    outcomes: HashMap<String, RuntimeOutcome>,
}

impl MockRuntimeEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pass(mut self, name: &str) -> Self {
        self.outcomes.insert(name.to_string(), RuntimeOutcome::Pass);
        self
    }

    pub fn with_fail(mut self, name: &str, evidence: &str) -> Self {
        self.outcomes.insert(
            name.to_string(),
            RuntimeOutcome::Fail {
                evidence: evidence.to_string(),
            },
        );
        self
    }
}

impl RuntimeEvidenceSource for MockRuntimeEvidence {
    fn outcome(&self, component: &SoftwareComponent) -> Option<RuntimeOutcome> {
        self.outcomes.get(component.name()).cloned()
    }
}
