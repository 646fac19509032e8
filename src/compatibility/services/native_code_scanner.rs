use crate::compatibility::domain::{NativeCodeEvidence, TargetArchitecture};

/// File suffixes of shared libraries
const NATIVE_EXTENSIONS: &[&str] = &[".so", ".dll", ".dylib", ".jnilib"];

/// Directory fragments that package per-platform binaries
const PLATFORM_DIRS: &[&str] = &[
    "linux-arm",
    "linux-arm64",
    "linux-aarch64",
    "linux-x86",
    "linux-x86_64",
    "linux-amd64",
    "windows-arm",
    "windows-arm64",
    "windows-x86",
    "windows-x86_64",
    "windows-amd64",
    "darwin-arm64",
    "darwin-x86_64",
    "darwin-amd64",
    "lib/arm",
    "lib/arm64",
    "lib/aarch64",
    "lib/x86",
    "lib/x86_64",
    "lib/amd64",
    "META-INF/native",
];

/// Markers of bundled loaders that extract native code at runtime
const NATIVE_LOADER_MARKERS: &[&str] = &["native-lib-loader", "NativeLibraryLoader"];

/// NativeCodeScanner - classifies archive listings and published build
/// variants into [`NativeCodeEvidence`].
///
/// Pure: it never touches the filesystem. Archive adapters feed it entry names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodeScanner {
    target: TargetArchitecture,
}

impl NativeCodeScanner {
    pub fn new(target: TargetArchitecture) -> Self {
        Self { target }
    }

    pub fn target(&self) -> TargetArchitecture {
        self.target
    }

    pub fn scan<'a, I>(&self, entries: I, source: &str) -> NativeCodeEvidence
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut evidence = NativeCodeEvidence {
            source: source.to_string(),
            ..Default::default()
        };

        for entry in entries {
            if is_shared_library(entry) {
                evidence.has_native_code = true;
                evidence.native_files.push(entry.to_string());
                evidence.target_specific |= self.target.is_target_specific(entry);
                evidence.foreign_specific |= self.target.is_foreign_specific(entry);
            }

            for dir in PLATFORM_DIRS.iter().filter(|d| entry.contains(**d)) {
                evidence.has_native_code = true;
                evidence.platform_dirs.insert(dir.to_string());
                evidence.target_specific |= self.target.is_target_specific(dir);
                evidence.foreign_specific |= self.target.is_foreign_specific(dir);
            }

            if NATIVE_LOADER_MARKERS.iter().any(|m| entry.contains(m)) {
                evidence.uses_native_loader = true;
            }
        }

        evidence
    }

    /// Evidence from build classifiers a registry publishes for a release.
    ///
    /// Returns `None` unless at least one classifier targets this architecture.
    pub fn from_published_classifiers(
        &self,
        classifiers: &[String],
        source: &str,
    ) -> Option<NativeCodeEvidence> {
        let target: Vec<String> = classifiers
            .iter()
            .filter(|c| self.target.is_target_specific(c))
            .cloned()
            .collect();
        if target.is_empty() {
            return None;
        }

        Some(NativeCodeEvidence {
            has_native_code: true,
            native_files: Vec::new(),
            target_specific: true,
            foreign_specific: false,
            platform_dirs: target.into_iter().collect(),
            uses_native_loader: false,
            source: source.to_string(),
        })
    }
}

fn is_shared_library(entry: &str) -> bool {
    let lower = entry.to_ascii_lowercase();
    NATIVE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) || lower.contains(".so.")
}
