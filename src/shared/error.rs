use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI pipelines to distinguish an incompatible
/// inventory from a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis completed
    Success = 0,
    /// Incompatible components found while `--fail-on-incompatible` was set
    IncompatibleComponents = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable input, unrecognized SBOM, I/O failure, etc.)
    ApplicationError = 3,
    /// Run was cancelled with Ctrl-C; nothing was written
    Interrupted = 130,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IncompatibleComponents => write!(f, "Incompatible Components (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::Interrupted => write!(f, "Interrupted (130)"),
        }
    }
}

/// Errors raised while loading inputs and analyzing components.
///
/// Only `EmptyInput` is fatal to an analysis run. The document, component and
/// evidence variants are recoverable: callers log them, record them in the
/// result and keep going.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to load document: {document}\nDetails: {details}")]
    DocumentLoad { document: String, details: String },

    #[error("Component skipped: {component_ref}\nReason: {reason}")]
    ComponentSkipped {
        component_ref: String,
        reason: String,
    },

    #[error("Evidence unavailable for {component_ref}: {details}")]
    EvidenceUnavailable {
        component_ref: String,
        details: String,
    },

    #[error("No components to analyze in {source_document}\n\n💡 Hint: Verify that the SBOM lists components (CycloneDX `components`, SPDX `packages` or Syft `artifacts`)")]
    EmptyInput { source_document: String },

    #[error("Unrecognized SBOM format in {source_document} (top-level keys: {keys})\n\n💡 Hint: Supported formats are CycloneDX JSON, SPDX JSON and Syft JSON")]
    UnrecognizedFormat {
        source_document: String,
        keys: String,
    },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    InvalidInputPath {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for builder patterns and documents
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::IncompatibleComponents.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::IncompatibleComponents),
            "Incompatible Components (1)"
        );
        assert_eq!(format!("{}", ExitCode::Interrupted), "Interrupted (130)");
    }

    #[test]
    fn test_empty_input_display() {
        let error = AnalysisError::EmptyInput {
            source_document: "sbom.json".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("No components to analyze"));
        assert!(display.contains("sbom.json"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_unrecognized_format_display() {
        let error = AnalysisError::UnrecognizedFormat {
            source_document: "weird.json".to_string(),
            keys: "foo, bar".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unrecognized SBOM format"));
        assert!(display.contains("foo, bar"));
    }

    #[test]
    fn test_component_skipped_display() {
        let error = AnalysisError::ComponentSkipped {
            component_ref: "#3".to_string(),
            reason: "missing name".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("#3"));
        assert!(display.contains("missing name"));
    }

    #[test]
    fn test_security_error_display() {
        let error = AnalysisError::SecurityError {
            path: PathBuf::from("/tmp/link.json"),
            reason: "symbolic link".to_string(),
            hint: "Pass the target file directly".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/tmp/link.json"));
        assert!(display.contains("Pass the target file directly"));
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(AnalysisError::Validation {
            message: "bad".to_string(),
        });
        assert_eq!(error.to_string(), "Validation error: bad");
    }
}
