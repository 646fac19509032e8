use crate::compatibility::domain::{NativeCodeEvidence, SoftwareComponent};
use crate::compatibility::services::NativeCodeScanner;
use crate::ports::outbound::{EvidenceError, NativeCodeInspector};
use crate::shared::security::{
    validate_input_directory, validate_input_file, MAX_ARCHIVE_ENTRIES, MAX_ARCHIVE_SIZE,
};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Archive extensions the inspector understands
pub const ARCHIVE_EXTENSIONS: &[&str] = &[".jar", ".war", ".ear", ".whl", ".zip"];

/// An indexed archive: its path and the normalized file stem it is matched by
#[derive(Debug, Clone)]
struct IndexedArchive {
    stem: String,
    path: PathBuf,
}

/// ZipArchiveInspector adapter reading native-code evidence from archives
///
/// Archives are indexed by file stem (`<name>-<version>[-<suffix>]`). For a
/// component the inspector picks the archive whose stem starts with the
/// component's `<name>-<version>`, lists its entries on a blocking thread and
/// hands them to the [`NativeCodeScanner`]. Only the central directory is
/// read; nothing is extracted.
pub struct ZipArchiveInspector {
    scanner: NativeCodeScanner,
    archives: Vec<IndexedArchive>,
}

impl ZipArchiveInspector {
    pub fn new(scanner: NativeCodeScanner) -> Self {
        Self {
            scanner,
            archives: Vec::new(),
        }
    }

    /// Adds one archive file to the index.
    pub fn with_archive(mut self, path: PathBuf) -> Result<Self> {
        validate_input_file(&path, "Archive", MAX_ARCHIVE_SIZE)?;
        match archive_stem(&path) {
            Some(stem) => self.archives.push(IndexedArchive { stem, path }),
            None => anyhow::bail!(
                "Unsupported archive: {} (expected one of {})",
                path.display(),
                ARCHIVE_EXTENSIONS.join(", ")
            ),
        }
        Ok(self)
    }

    /// Adds every archive directly inside `dir` to the index.
    pub fn with_directory(mut self, dir: &Path) -> Result<Self> {
        validate_input_directory(dir, "Archive directory")?;

        let mut found: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && archive_stem(path).is_some())
            .collect();
        found.sort();

        info!(directory = %dir.display(), archives = found.len(), "Indexed archives");
        for path in found {
            if let Some(stem) = archive_stem(&path) {
                self.archives.push(IndexedArchive { stem, path });
            }
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// First indexed archive whose stem is `<name>-<version>` or continues it
    /// with `-`.
    fn find_archive(&self, component: &SoftwareComponent) -> Option<&IndexedArchive> {
        if component.version().is_empty() {
            return None;
        }
        let artifact = component
            .name()
            .rsplit_once(':')
            .map_or(component.name(), |(_, artifact)| artifact);
        let key = normalize(&format!("{}-{}", artifact, component.version()));

        self.archives.iter().find(|archive| {
            archive
                .stem
                .strip_prefix(key.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
        })
    }
}

/// Lowercased with `_` folded to `-` (wheel file names use `_`).
fn normalize(text: &str) -> String {
    text.to_lowercase().replace('_', "-")
}

fn archive_stem(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let lower = file_name.to_lowercase();
    ARCHIVE_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| normalize(&file_name[..file_name.len() - ext.len()]))
}

/// Entry names of a zip archive, bounded by [`MAX_ARCHIVE_ENTRIES`].
fn list_entries(path: &Path) -> std::result::Result<Vec<String>, EvidenceError> {
    validate_input_file(path, "Archive", MAX_ARCHIVE_SIZE)
        .map_err(|e| EvidenceError::permanent(e.to_string()))?;

    let file = File::open(path).map_err(|e| {
        EvidenceError::permanent(format!("Failed to open archive {}: {}", path.display(), e))
    })?;
    let archive = zip::ZipArchive::new(file).map_err(|e| {
        EvidenceError::permanent(format!("Failed to read archive {}: {}", path.display(), e))
    })?;

    if archive.len() > MAX_ARCHIVE_ENTRIES {
        return Err(EvidenceError::permanent(format!(
            "Archive {} has too many entries ({}, maximum {})",
            path.display(),
            archive.len(),
            MAX_ARCHIVE_ENTRIES
        )));
    }

    Ok(archive.file_names().map(str::to_string).collect())
}

#[async_trait]
impl NativeCodeInspector for ZipArchiveInspector {
    async fn inspect(
        &self,
        component: &SoftwareComponent,
    ) -> std::result::Result<Option<NativeCodeEvidence>, EvidenceError> {
        let Some(archive) = self.find_archive(component) else {
            return Ok(None);
        };

        debug!(component = %component, archive = %archive.path.display(), "Inspecting archive");
        let path = archive.path.clone();
        let entries = tokio::task::spawn_blocking(move || list_entries(&path))
            .await
            .map_err(|e| EvidenceError::transient(format!("Archive listing was cancelled: {}", e)))??;

        let source = archive
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        Ok(Some(self.scanner.scan(entries.iter().map(String::as_str), source)))
    }
}
