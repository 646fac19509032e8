use super::component::SoftwareComponent;
use super::record::Confidence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification outcome for one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatus {
    Compatible,
    Incompatible,
    NeedsUpgrade,
    NeedsVerification,
    NeedsVersionVerification,
    Unknown,
}

impl CompatibilityStatus {
    pub const ALL: [CompatibilityStatus; 6] = [
        CompatibilityStatus::Compatible,
        CompatibilityStatus::Incompatible,
        CompatibilityStatus::NeedsUpgrade,
        CompatibilityStatus::NeedsVerification,
        CompatibilityStatus::NeedsVersionVerification,
        CompatibilityStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "compatible",
            CompatibilityStatus::Incompatible => "incompatible",
            CompatibilityStatus::NeedsUpgrade => "needs_upgrade",
            CompatibilityStatus::NeedsVerification => "needs_verification",
            CompatibilityStatus::NeedsVersionVerification => "needs_version_verification",
            CompatibilityStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one component. Built once and replaced, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub status: CompatibilityStatus,
    pub current_version_supported: bool,
    pub minimum_supported_version: Option<String>,
    pub recommended_version: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub confidence_level: Confidence,
    /// Set when a deny-list entry produced this verdict
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deny_listed: bool,
}

impl CompatibilityResult {
    /// Verdict for a component with no knowledge-base entry
    pub fn unknown() -> Self {
        Self {
            status: CompatibilityStatus::Unknown,
            current_version_supported: false,
            minimum_supported_version: None,
            recommended_version: None,
            notes: String::new(),
            confidence_level: Confidence::Low,
            deny_listed: false,
        }
    }

    /// Verdict forced by a deny-list entry
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            status: CompatibilityStatus::Incompatible,
            current_version_supported: false,
            minimum_supported_version: None,
            recommended_version: None,
            notes: reason.into(),
            confidence_level: Confidence::High,
            deny_listed: true,
        }
    }

    /// Appends `note` on its own segment unless it is already present.
    pub fn with_note(mut self, note: &str) -> Self {
        if note.is_empty() || self.notes.contains(note) {
            return self;
        }
        if self.notes.is_empty() {
            self.notes = note.to_string();
        } else {
            self.notes = format!("{}; {}", self.notes, note);
        }
        self
    }
}

/// A component paired with its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentResult {
    pub component: SoftwareComponent,
    pub compatibility: CompatibilityResult,
}

impl ComponentResult {
    pub fn new(component: SoftwareComponent, compatibility: CompatibilityResult) -> Self {
        Self {
            component,
            compatibility,
        }
    }

    pub fn status(&self) -> CompatibilityStatus {
        self.compatibility.status
    }
}
