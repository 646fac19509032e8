//! Configuration file support for arm-compat.
//!
//! Provides YAML-based configuration through `arm-compat.config.yml` files,
//! and resolves the file values against command-line flags for `analyze`.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arm_compat::application::dto::{
    AnalysisRequest, EvidenceSettings, OutputFormat, DEFAULT_OS_KNOWLEDGE_BASE_SUFFIX,
};
use arm_compat::compatibility::domain::TargetArchitecture;
use arm_compat::shared::Result;

use crate::cli::AnalyzeArgs;

pub const CONFIG_FILENAME: &str = "arm-compat.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub target_architecture: Option<String>,
    pub knowledge_bases: Option<Vec<PathBuf>>,
    pub knowledge_base_dir: Option<PathBuf>,
    pub os_knowledge_base_dir: Option<PathBuf>,
    pub os_knowledge_base_suffix: Option<String>,
    pub deny_lists: Option<Vec<PathBuf>>,
    pub deny_list_dir: Option<PathBuf>,
    pub use_builtin_knowledge_base: Option<bool>,
    pub matching: Option<MatchingConfig>,
    pub evidence: Option<EvidenceConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MatchingConfig {
    pub fuzzy: Option<bool>,
    pub extra_suffixes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EvidenceConfig {
    pub max_concurrency: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<u32>,
}

impl ConfigFile {
    /// Rewrites relative paths so they resolve against `base`, the directory
    /// holding the config file.
    fn anchor_paths(&mut self, base: &Path) {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        for path in self.knowledge_bases.iter_mut().flatten() {
            anchor(path);
        }
        for path in self.deny_lists.iter_mut().flatten() {
            anchor(path);
        }
        for dir in [
            &mut self.knowledge_base_dir,
            &mut self.os_knowledge_base_dir,
            &mut self.deny_list_dir,
        ]
        .into_iter()
        .flatten()
        {
            anchor(dir);
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    if let Some(base) = path.parent() {
        config.anchor_paths(base);
    }
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        format.parse::<OutputFormat>().map_err(|e| {
            anyhow::anyhow!(
                "Invalid config: {}\n\n💡 Hint: 'format' must be 'json' or 'markdown'.",
                e
            )
        })?;
    }

    if let Some(ref target) = config.target_architecture {
        target.parse::<TargetArchitecture>().map_err(|e| {
            anyhow::anyhow!(
                "Invalid config: {}\n\n💡 Hint: 'target_architecture' must be 'arm64' or 'x86_64'.",
                e
            )
        })?;
    }

    if let Some(ref suffix) = config.os_knowledge_base_suffix {
        if suffix.trim().is_empty() {
            bail!("Invalid config: os_knowledge_base_suffix must not be empty.");
        }
    }

    if let Some(ref evidence) = config.evidence {
        if evidence.max_concurrency == Some(0) {
            bail!(
                "Invalid config: evidence.max_concurrency must be greater than 0.\n\n\
                 💡 Hint: Use 1 to inspect one component at a time."
            );
        }
        if evidence.timeout_seconds == Some(0) {
            bail!("Invalid config: evidence.timeout_seconds must be greater than 0.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Settings of one `analyze` run: command-line flags layered over the
/// config file, layered over defaults.
#[derive(Debug, Clone)]
pub struct AnalyzeSettings {
    pub request: AnalysisRequest,
    pub sbom_directory: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub target: TargetArchitecture,
    pub knowledge_bases: Vec<PathBuf>,
    pub knowledge_base_dir: Option<PathBuf>,
    pub deny_lists: Vec<PathBuf>,
    pub deny_list_dir: Option<PathBuf>,
    pub use_builtin_knowledge_base: bool,
    pub fuzzy: bool,
    pub extra_suffixes: Vec<String>,
    pub archives: Vec<PathBuf>,
    pub archive_dir: Option<PathBuf>,
    pub runtime_results: Vec<PathBuf>,
    pub maven_lookup: bool,
    pub evidence: EvidenceSettings,
    pub fail_on_incompatible: bool,
}

impl AnalyzeSettings {
    pub fn resolve(args: AnalyzeArgs, config: ConfigFile) -> Result<Self> {
        if args.max_concurrency == Some(0) {
            bail!("--max-concurrency must be greater than 0");
        }
        if args.timeout_seconds == Some(0) {
            bail!("--timeout must be greater than 0");
        }

        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => format.parse().map_err(anyhow::Error::msg)?,
            (None, None) => OutputFormat::Json,
        };
        let target = match (args.target, config.target_architecture.as_deref()) {
            (Some(target), _) => target,
            (None, Some(target)) => target.parse().map_err(anyhow::Error::msg)?,
            (None, None) => TargetArchitecture::default(),
        };

        let matching = config.matching.unwrap_or_default();
        let evidence_config = config.evidence.unwrap_or_default();
        let defaults = EvidenceSettings::default();
        let evidence = EvidenceSettings {
            max_concurrency: args
                .max_concurrency
                .or(evidence_config.max_concurrency)
                .unwrap_or(defaults.max_concurrency),
            timeout: args
                .timeout_seconds
                .or(evidence_config.timeout_seconds)
                .map_or(defaults.timeout, Duration::from_secs),
            max_retries: args
                .max_retries
                .or(evidence_config.max_retries)
                .unwrap_or(defaults.max_retries),
        };

        let mut request = AnalysisRequest::new(args.sboms).with_os_knowledge_base_suffix(
            args.os_kb_suffix
                .or(config.os_knowledge_base_suffix)
                .unwrap_or_else(|| DEFAULT_OS_KNOWLEDGE_BASE_SUFFIX.to_string()),
        );
        if let Some(dir) = args.os_kb_dir.or(config.os_knowledge_base_dir) {
            request = request.with_os_knowledge_base_dir(dir);
        }

        Ok(Self {
            request,
            sbom_directory: args.directory,
            format,
            output: args.output,
            target,
            knowledge_bases: prefer_cli(args.knowledge_bases, config.knowledge_bases),
            knowledge_base_dir: args.knowledge_base_dir.or(config.knowledge_base_dir),
            deny_lists: prefer_cli(args.deny_lists, config.deny_lists),
            deny_list_dir: args.deny_list_dir.or(config.deny_list_dir),
            use_builtin_knowledge_base: !args.no_builtin_kb
                && config.use_builtin_knowledge_base.unwrap_or(true),
            fuzzy: args.fuzzy || matching.fuzzy.unwrap_or(false),
            extra_suffixes: matching.extra_suffixes.unwrap_or_default(),
            archives: args.archives,
            archive_dir: args.archive_dir,
            runtime_results: args.runtime_results,
            maven_lookup: args.maven_lookup,
            evidence,
            fail_on_incompatible: args.fail_on_incompatible,
        })
    }
}

/// A list given on the command line replaces the config file's list.
fn prefer_cli<T>(cli: Vec<T>, config: Option<Vec<T>>) -> Vec<T> {
    if cli.is_empty() {
        config.unwrap_or_default()
    } else {
        cli
    }
}
