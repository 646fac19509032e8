use arm_compat::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Mock DocumentReader serving in-memory documents by path
#[derive(Default)]
pub struct MockDocumentReader {
    documents: BTreeMap<PathBuf, String>,
}

impl MockDocumentReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        self.documents.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl DocumentReader for MockDocumentReader {
    fn read_document(&self, path: &Path, description: &str) -> Result<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} not found: {}", description, path.display()))
    }

    fn list_documents(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        Ok(self
            .documents
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter(|path| {
                let name = path.to_string_lossy();
                extensions.iter().any(|ext| name.ends_with(ext))
            })
            .cloned()
            .collect())
    }
}
