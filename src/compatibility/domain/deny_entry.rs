use serde::{Deserialize, Serialize};

/// A name pattern that forces an INCOMPATIBLE verdict.
///
/// `pattern` is either an exact component name or a glob using `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenyEntry {
    pub pattern: String,
    pub reason: String,
}

impl DenyEntry {
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
