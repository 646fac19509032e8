use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Size ceiling for JSON documents (SBOMs, knowledge bases, deny lists, reports)
pub const MAX_DOCUMENT_SIZE: u64 = 100 * 1024 * 1024;

/// Size ceiling for archives handed to the native-code inspector
pub const MAX_ARCHIVE_SIZE: u64 = 512 * 1024 * 1024;

/// Entry-count ceiling for a single archive listing
pub const MAX_ARCHIVE_ENTRIES: usize = 65_536;

/// Checks that `path` is a regular, non-symlinked file no larger than `max_size`.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// Returns the file size on success.
pub fn validate_input_file(path: &Path, description: &str, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AnalysisError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", description, e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", description),
            hint: "Symbolic links are not followed. Pass the target file directly.".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", description),
        }
        .into());
    }

    let size = metadata.len();
    if size > max_size {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes, maximum {} bytes)",
                description, size, max_size
            ),
            hint: "Split the input or check that the right file was passed.".to_string(),
        }
        .into());
    }

    Ok(size)
}

/// Checks that `path` is an existing directory and not a symbolic link.
pub fn validate_input_directory(path: &Path, description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AnalysisError::InvalidInputPath {
        path: path.to_path_buf(),
        reason: format!("{} does not exist or is unreadable: {}", description, e),
        hint: "Please specify an existing directory".to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", description),
            hint: "Symbolic links are not followed. Pass the target directory directly."
                .to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(AnalysisError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
            hint: "Please specify an existing directory".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Rejects values that would change the shape of a URL they are spliced into.
pub fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("{} must not be empty", component_type);
    }

    if component.contains('/') || component.contains('\\') || component.contains("..") {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            component_type
        );
    }

    if component.contains('#') || component.contains('?') || component.contains('&') {
        anyhow::bail!(
            "Security: {} contains URL-unsafe characters",
            component_type
        );
    }

    Ok(())
}

/// Checks that `segment` can only ever name a file inside the directory it
/// is joined to.
///
/// Used for file names built from SBOM content (the detected OS). Allows
/// ASCII letters, digits, `.`, `_` and `-`, and refuses `..`.
pub fn validate_file_name_segment(segment: &str, description: &str) -> Result<()> {
    if segment.is_empty() {
        anyhow::bail!("{} must not be empty", description);
    }

    if let Some(c) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        anyhow::bail!(
            "Security: {} '{}' contains {:?}, which is not allowed in a file name",
            description,
            segment,
            c
        );
    }

    if segment.contains("..") {
        anyhow::bail!(
            "Security: {} '{}' contains '..', which is not allowed in a file name",
            description,
            segment
        );
    }

    Ok(())
}
