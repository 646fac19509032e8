use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Architecture the inventory is being assessed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetArchitecture {
    #[default]
    Arm64,
    X86_64,
}

const ARM_MARKERS: &[&str] = &["arm64", "aarch64", "aarch_64", "arm", "aarch32", "armv7", "armv8"];
const X86_MARKERS: &[&str] = &["x86_64", "x86", "amd64", "i386", "i686"];

impl TargetArchitecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetArchitecture::Arm64 => "arm64",
            TargetArchitecture::X86_64 => "x86_64",
        }
    }

    /// Substrings that mark a binary or directory as built for this target
    pub fn target_markers(&self) -> &'static [&'static str] {
        match self {
            TargetArchitecture::Arm64 => ARM_MARKERS,
            TargetArchitecture::X86_64 => X86_MARKERS,
        }
    }

    /// Substrings that mark a binary or directory as built for the other architecture
    pub fn foreign_markers(&self) -> &'static [&'static str] {
        match self {
            TargetArchitecture::Arm64 => X86_MARKERS,
            TargetArchitecture::X86_64 => ARM_MARKERS,
        }
    }

    pub fn is_target_specific(&self, text: &str) -> bool {
        let lower = text.to_ascii_lowercase();
        self.target_markers().iter().any(|m| lower.contains(m))
    }

    pub fn is_foreign_specific(&self, text: &str) -> bool {
        let lower = text.to_ascii_lowercase();
        self.foreign_markers().iter().any(|m| lower.contains(m))
    }
}

impl FromStr for TargetArchitecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arm64" | "aarch64" | "arm" => Ok(TargetArchitecture::Arm64),
            "x86_64" | "amd64" | "x86" => Ok(TargetArchitecture::X86_64),
            _ => Err(format!(
                "Invalid target architecture: {}. Please specify 'arm64' or 'x86_64'",
                s
            )),
        }
    }
}

impl fmt::Display for TargetArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a native-code scan says about target support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeSignal {
    NoNativeCode,
    /// Only builds for the other architecture were found
    ForeignOnly,
    /// Only builds for the target architecture were found
    TargetOnly,
    Mixed,
    /// Native code without any architecture marker
    Unclassified,
}

impl NativeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeSignal::NoNativeCode => "none",
            NativeSignal::ForeignOnly => "foreign-only",
            NativeSignal::TargetOnly => "target-only",
            NativeSignal::Mixed => "mixed",
            NativeSignal::Unclassified => "unclassified",
        }
    }
}

/// Native binaries observed inside a component's distributable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeCodeEvidence {
    pub has_native_code: bool,
    pub native_files: Vec<String>,
    pub target_specific: bool,
    pub foreign_specific: bool,
    pub platform_dirs: BTreeSet<String>,
    pub uses_native_loader: bool,
    /// Where the evidence came from (archive path, registry name)
    pub source: String,
}

impl NativeCodeEvidence {
    pub fn signal(&self) -> NativeSignal {
        if !self.has_native_code {
            return NativeSignal::NoNativeCode;
        }
        match (self.target_specific, self.foreign_specific) {
            (true, true) => NativeSignal::Mixed,
            (true, false) => NativeSignal::TargetOnly,
            (false, true) => NativeSignal::ForeignOnly,
            (false, false) => NativeSignal::Unclassified,
        }
    }

    /// One-line audit summary appended to result notes.
    pub fn describe(&self, target: TargetArchitecture) -> String {
        let what = match self.signal() {
            NativeSignal::NoNativeCode => "no native code".to_string(),
            NativeSignal::ForeignOnly => format!("native binaries with no {} build", target),
            NativeSignal::TargetOnly => format!("native binaries built for {}", target),
            NativeSignal::Mixed => "native binaries for several architectures".to_string(),
            NativeSignal::Unclassified => "native binaries of unknown architecture".to_string(),
        };

        let mut summary = format!("{} in {}", what, self.source);
        if !self.native_files.is_empty() {
            summary.push_str(&format!(" ({} file(s))", self.native_files.len()));
        }
        if self.uses_native_loader {
            summary.push_str(", uses a native library loader");
        }
        summary
    }
}

/// Result of an external runtime test for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeOutcome {
    Pass,
    Fail { evidence: String },
    NotAttempted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(target: bool, foreign: bool) -> NativeCodeEvidence {
        NativeCodeEvidence {
            has_native_code: true,
            native_files: vec!["lib/libfoo.so".to_string()],
            target_specific: target,
            foreign_specific: foreign,
            source: "foo-1.0.jar".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_markers_for_arm64_target() {
        let target = TargetArchitecture::Arm64;
        assert!(target.is_target_specific("linux-aarch64/libjnidispatch.so"));
        assert!(target.is_foreign_specific("linux-x86-64/libjnidispatch.so"));
        assert!(!target.is_foreign_specific("libsqlitejdbc.so"));
    }

    #[test]
    fn test_markers_swap_for_x86_target() {
        let target = TargetArchitecture::X86_64;
        assert!(target.is_target_specific("lib/amd64/libz.so"));
        assert!(target.is_foreign_specific("lib/arm64/libz.so"));
    }

    #[test]
    fn test_target_architecture_from_str() {
        assert_eq!("aarch64".parse::<TargetArchitecture>().unwrap(), TargetArchitecture::Arm64);
        assert_eq!("AMD64".parse::<TargetArchitecture>().unwrap(), TargetArchitecture::X86_64);
        assert!("riscv".parse::<TargetArchitecture>().is_err());
    }

    #[test]
    fn test_signal() {
        assert_eq!(NativeCodeEvidence::default().signal(), NativeSignal::NoNativeCode);
        assert_eq!(evidence(true, false).signal(), NativeSignal::TargetOnly);
        assert_eq!(evidence(false, true).signal(), NativeSignal::ForeignOnly);
        assert_eq!(evidence(true, true).signal(), NativeSignal::Mixed);
        assert_eq!(evidence(false, false).signal(), NativeSignal::Unclassified);
    }

    #[test]
    fn test_describe_mentions_source_and_count() {
        let mut e = evidence(false, true);
        e.uses_native_loader = true;
        let text = e.describe(TargetArchitecture::Arm64);
        assert!(text.contains("with no arm64 build"));
        assert!(text.contains("foo-1.0.jar"));
        assert!(text.contains("1 file(s)"));
        assert!(text.contains("native library loader"));
    }
}
