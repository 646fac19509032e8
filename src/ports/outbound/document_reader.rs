use crate::shared::Result;
use std::path::{Path, PathBuf};

/// DocumentReader port for loading SBOMs, knowledge bases, deny lists and
/// runtime result documents
///
/// Implementations must apply the same safety checks to every document
/// (no symbolic links, regular files only, bounded size).
pub trait DocumentReader {
    /// Reads a whole document as UTF-8 text
    ///
    /// # Arguments
    /// * `path` - Path of the document
    /// * `description` - Human-readable kind of document, used in errors
    ///
    /// # Errors
    /// Returns an error if the path fails a safety check or cannot be read
    fn read_document(&self, path: &Path, description: &str) -> Result<String>;

    /// Lists the files directly inside `dir` whose extension is one of
    /// `extensions` (case-insensitive), sorted by path.
    ///
    /// # Errors
    /// Returns an error if `dir` is not a readable directory
    fn list_documents(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>>;
}
