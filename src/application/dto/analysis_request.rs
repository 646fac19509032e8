use crate::shared::security::validate_file_name_segment;
use crate::shared::Result;
use std::path::PathBuf;

/// Default file name suffix of OS knowledge-base documents
pub const DEFAULT_OS_KNOWLEDGE_BASE_SUFFIX: &str = "-packages.json";

/// AnalysisRequest - input of the analyze use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// SBOM documents, analyzed in this order
    pub sbom_paths: Vec<PathBuf>,
    /// Directory holding `<os-id>-<version><suffix>` documents
    pub os_knowledge_base_dir: Option<PathBuf>,
    pub os_knowledge_base_suffix: String,
}

impl AnalysisRequest {
    pub fn new(sbom_paths: Vec<PathBuf>) -> Self {
        Self {
            sbom_paths,
            os_knowledge_base_dir: None,
            os_knowledge_base_suffix: DEFAULT_OS_KNOWLEDGE_BASE_SUFFIX.to_string(),
        }
    }

    pub fn with_os_knowledge_base_dir(mut self, dir: PathBuf) -> Self {
        self.os_knowledge_base_dir = Some(dir);
        self
    }

    pub fn with_os_knowledge_base_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.os_knowledge_base_suffix = suffix.into();
        self
    }

    /// Location of the OS document for `detected_os`, if an OS directory is set.
    ///
    /// `detected_os` comes from the SBOM, so it must be a plain file name
    /// segment; anything that could leave the directory is an error.
    pub fn os_knowledge_base_path(&self, detected_os: &str) -> Result<Option<PathBuf>> {
        let Some(dir) = self.os_knowledge_base_dir.as_ref() else {
            return Ok(None);
        };
        validate_file_name_segment(detected_os, "Detected OS")?;
        Ok(Some(
            dir.join(format!("{}{}", detected_os, self.os_knowledge_base_suffix)),
        ))
    }
}
