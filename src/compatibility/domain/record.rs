use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How much a verdict can be trusted.
///
/// Ordered `Low < Medium < High` so floors can be applied with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Confidence::High),
            "MEDIUM" => Ok(Confidence::Medium),
            "LOW" => Ok(Confidence::Low),
            _ => Err(format!(
                "Invalid confidence: {}. Expected HIGH, MEDIUM or LOW",
                s
            )),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curated knowledge about one piece of software on the target architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRecord {
    pub canonical_name: String,
    /// Lowercased alternate names
    pub aliases: BTreeSet<String>,
    pub compatible: bool,
    pub minimum_supported_version: Option<String>,
    pub recommended_version: Option<String>,
    pub notes: String,
    pub confidence: Confidence,
    /// Ecosystem qualifier (`npm`, `maven`, `os-package`, ...) for records that
    /// only apply within one ecosystem
    pub ecosystem: Option<String>,
}

impl CompatibilityRecord {
    pub fn new(canonical_name: impl Into<String>, compatible: bool, confidence: Confidence) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            aliases: BTreeSet::new(),
            compatible,
            minimum_supported_version: None,
            recommended_version: None,
            notes: String::new(),
            confidence,
            ecosystem: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aliases.extend(
            aliases
                .into_iter()
                .map(|a| a.as_ref().trim().to_lowercase())
                .filter(|a| !a.is_empty()),
        );
        self
    }

    pub fn with_minimum_version(mut self, version: impl Into<String>) -> Self {
        self.minimum_supported_version = Some(version.into());
        self
    }

    pub fn with_recommended_version(mut self, version: impl Into<String>) -> Self {
        self.recommended_version = Some(version.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_ecosystem(mut self, ecosystem: impl Into<String>) -> Self {
        self.ecosystem = Some(ecosystem.into().to_lowercase());
        self
    }

    /// Key the record is stored under: `ecosystem:name` when qualified,
    /// otherwise the lowercased canonical name.
    pub fn storage_key(&self) -> String {
        let name = self.canonical_name.to_lowercase();
        match &self.ecosystem {
            Some(ecosystem) => format!("{}:{}", ecosystem, name),
            None => name,
        }
    }
}
