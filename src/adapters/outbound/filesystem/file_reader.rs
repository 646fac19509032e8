use crate::ports::outbound::DocumentReader;
use crate::shared::error::AnalysisError;
use crate::shared::security::{validate_input_directory, validate_input_file, MAX_DOCUMENT_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading JSON documents from the file system
///
/// Every read goes through the shared security checks: symbolic links are
/// rejected, only regular files are read and the size is capped.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for FileSystemReader {
    fn read_document(&self, path: &Path, description: &str) -> Result<String> {
        if !path.exists() {
            return Err(AnalysisError::FileReadError {
                path: path.to_path_buf(),
                details: format!("{} does not exist", description),
            }
            .into());
        }

        validate_input_file(path, description, MAX_DOCUMENT_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            AnalysisError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Failed to read {}: {}", description, e),
            }
            .into()
        })
    }

    fn list_documents(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        validate_input_directory(dir, "Document directory")?;

        let entries = fs::read_dir(dir).map_err(|e| AnalysisError::FileReadError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AnalysisError::FileReadError {
                path: dir.to_path_buf(),
                details: e.to_string(),
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| AnalysisError::FileReadError {
                path: path.clone(),
                details: e.to_string(),
            })?;
            if !file_type.is_file() {
                continue;
            }
            let matches_extension = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| extensions.iter().any(|ext| name.ends_with(ext)));
            if matches_extension {
                documents.push(path);
            }
        }

        // read_dir order is platform dependent
        documents.sort();
        Ok(documents)
    }
}
