use crate::compatibility::domain::DenyEntry;
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use serde::Deserialize;
use tracing::{info, warn};

/// Maximum number of deny patterns across all loaded documents
const MAX_DENY_PATTERNS: usize = 10_000;

/// Maximum length of a single deny pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// On-disk deny-list document
#[derive(Debug, Deserialize)]
pub struct DenyListDocument {
    pub entries: Vec<DenyEntry>,
}

/// DenyListOverlay - name patterns that force an INCOMPATIBLE verdict
///
/// Patterns are exact names or globs where `*` matches zero or more
/// characters. Matching is case-insensitive and the first pattern in load
/// order wins.
#[derive(Debug, Clone, Default)]
pub struct DenyListOverlay {
    patterns: Vec<DenyPattern>,
}

impl DenyListOverlay {
    /// Compiles `entries`, failing on the first invalid pattern.
    pub fn new(entries: Vec<DenyEntry>) -> Result<Self> {
        let mut overlay = Self::default();
        for entry in entries {
            overlay.push(entry)?;
        }
        Ok(overlay)
    }

    /// Loads deny-list documents in order.
    ///
    /// A document that fails to parse is skipped; an invalid pattern skips
    /// only that entry. Both are reported as `DocumentLoad` errors.
    pub fn load<I, L, C>(documents: I) -> (Self, Vec<AnalysisError>)
    where
        I: IntoIterator<Item = (L, C)>,
        L: AsRef<str>,
        C: AsRef<str>,
    {
        let mut overlay = Self::default();
        let mut errors = Vec::new();

        for (label, content) in documents {
            let label = label.as_ref();
            let document: DenyListDocument = match serde_json::from_str(content.as_ref()) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(document = label, error = %e, "Skipping deny list document");
                    errors.push(AnalysisError::DocumentLoad {
                        document: label.to_string(),
                        details: e.to_string(),
                    });
                    continue;
                }
            };

            let before = overlay.len();
            for entry in document.entries {
                if let Err(e) = overlay.push(entry) {
                    warn!(document = label, error = %e, "Skipping deny list entry");
                    errors.push(AnalysisError::DocumentLoad {
                        document: label.to_string(),
                        details: e.to_string(),
                    });
                }
            }
            info!(
                document = label,
                added = overlay.len() - before,
                "Loaded deny list document"
            );
        }

        (overlay, errors)
    }

    /// Returns the first entry whose pattern matches `component_name`.
    pub fn check(&self, component_name: &str) -> Option<&DenyEntry> {
        let name = component_name.to_lowercase();
        self.patterns
            .iter()
            .find(|p| p.matcher.matches(&name))
            .map(|p| &p.entry)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn push(&mut self, entry: DenyEntry) -> Result<()> {
        if self.patterns.len() >= MAX_DENY_PATTERNS {
            anyhow::bail!(
                "Too many deny patterns (maximum: {})",
                MAX_DENY_PATTERNS
            );
        }
        self.patterns.push(DenyPattern::new(entry)?);
        Ok(())
    }
}

/// A deny entry with its compiled matcher
#[derive(Debug, Clone)]
struct DenyPattern {
    entry: DenyEntry,
    matcher: PatternMatcher,
}

impl DenyPattern {
    fn new(entry: DenyEntry) -> Result<Self> {
        let pattern = entry.pattern.trim().to_lowercase();
        validate_pattern(&pattern)?;
        let matcher = compile_pattern(&pattern);
        Ok(Self { entry, matcher })
    }
}

/// Pattern matcher types; all operands are lowercased
#[derive(Debug, Clone, PartialEq)]
enum PatternMatcher {
    /// "package-name"
    Exact(String),
    /// "*-suffix"
    EndsWith(String),
    /// "prefix-*"
    StartsWith(String),
    /// "*middle*"
    Contains(String),
    /// "pre*fix*suf": anchored at both ends, parts in order
    Glob(Vec<String>),
}

impl PatternMatcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::EndsWith(suffix) => name.ends_with(suffix),
            PatternMatcher::StartsWith(prefix) => name.starts_with(prefix),
            PatternMatcher::Contains(middle) => name.contains(middle),
            PatternMatcher::Glob(parts) => glob_matches(parts, name),
        }
    }
}

/// `parts` is the pattern split on `*`; empty first/last parts mean the
/// pattern starts/ends with a wildcard.
fn glob_matches(parts: &[String], name: &str) -> bool {
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return false;
    };
    if !name.starts_with(first.as_str()) {
        return false;
    }

    let mut pos = first.len();
    let middle_end = parts.len().saturating_sub(1);
    for part in parts.iter().take(middle_end).skip(1) {
        if part.is_empty() {
            continue;
        }
        match name[pos..].find(part.as_str()) {
            Some(found) => pos += found + part.len(),
            None => return false,
        }
    }

    parts.len() == 1 || (name.len() >= pos + last.len() && name[pos..].ends_with(last.as_str()))
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Deny pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Deny pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Deny pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, '-', '_', '.', ':', '/', '@', '+', brackets and '*' are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!("Deny pattern cannot contain only wildcards: '{}'", pattern);
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | '@' | '+' | '[' | ']' | '*')
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    match pattern.matches('*').count() {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 => {
            if let Some(suffix) = pattern.strip_prefix('*') {
                PatternMatcher::EndsWith(suffix.to_string())
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                PatternMatcher::StartsWith(prefix.to_string())
            } else {
                PatternMatcher::Glob(pattern.split('*').map(str::to_string).collect())
            }
        }
        2 if pattern.starts_with('*') && pattern.ends_with('*') => {
            PatternMatcher::Contains(pattern[1..pattern.len() - 1].to_string())
        }
        _ => PatternMatcher::Glob(pattern.split('*').map(str::to_string).collect()),
    }
}
