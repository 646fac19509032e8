use arm_compat::application::dto::OutputFormat;
use arm_compat::compatibility::domain::TargetArchitecture;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Classify SBOM components for arm64/aarch64 compatibility
#[derive(Parser, Debug)]
#[command(name = "arm-compat")]
#[command(version)]
#[command(
    about = "Classify SBOM components for arm64/aarch64 compatibility",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one or more SBOM documents (CycloneDX, SPDX or Syft JSON)
    Analyze(AnalyzeArgs),
    /// Combine previously written JSON reports into one
    Merge(MergeArgs),
}

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// SBOM documents, analyzed in the given order
    #[arg(value_name = "SBOM", required_unless_present = "directory")]
    pub sboms: Vec<PathBuf>,

    /// Also analyze every .json file in this directory
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Knowledge-base document; can be specified multiple times
    #[arg(short = 'k', long = "knowledge-base", value_name = "FILE")]
    pub knowledge_bases: Vec<PathBuf>,

    /// Load every .json knowledge-base document in this directory
    #[arg(long, value_name = "DIR")]
    pub knowledge_base_dir: Option<PathBuf>,

    /// Deny-list document; can be specified multiple times
    #[arg(long = "deny-list", value_name = "FILE")]
    pub deny_lists: Vec<PathBuf>,

    /// Load every .json deny-list document in this directory
    #[arg(long, value_name = "DIR")]
    pub deny_list_dir: Option<PathBuf>,

    /// Directory of OS knowledge-base documents (<os>-<version><suffix>)
    #[arg(long = "os-kb-dir", value_name = "DIR")]
    pub os_kb_dir: Option<PathBuf>,

    /// File name suffix of OS knowledge-base documents
    #[arg(long = "os-kb-suffix", value_name = "SUFFIX")]
    pub os_kb_suffix: Option<String>,

    /// Do not fall back to the built-in knowledge base
    #[arg(long = "no-builtin-kb")]
    pub no_builtin_kb: bool,

    /// Enable fuzzy name matching (qualifier suffixes, separators, case)
    #[arg(long)]
    pub fuzzy: bool,

    /// Distributable archive (.jar, .war, .ear, .whl, .zip) to inspect for native code
    #[arg(long = "archive", value_name = "FILE")]
    pub archives: Vec<PathBuf>,

    /// Directory of distributable archives to inspect for native code
    #[arg(long, value_name = "DIR")]
    pub archive_dir: Option<PathBuf>,

    /// Runtime test result document; can be specified multiple times
    #[arg(long = "runtime-results", value_name = "FILE")]
    pub runtime_results: Vec<PathBuf>,

    /// Query Maven Central for published native classifiers
    #[arg(long)]
    pub maven_lookup: bool,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when any component is INCOMPATIBLE
    #[arg(long)]
    pub fail_on_incompatible: bool,

    /// Configuration file (defaults to ./arm-compat.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target architecture: arm64 or x86_64
    #[arg(short, long)]
    pub target: Option<TargetArchitecture>,

    /// Evidence inspections in flight at once
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Per-call evidence timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// Retries for transient evidence failures
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// JSON reports written by `arm-compat analyze`
    #[arg(value_name = "REPORT", required = true)]
    pub reports: Vec<PathBuf>,

    /// Runtime test result document to fold into the merged report
    #[arg(long = "runtime-results", value_name = "FILE")]
    pub runtime_results: Vec<PathBuf>,

    /// Output format: json or markdown
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when any component is INCOMPATIBLE
    #[arg(long)]
    pub fail_on_incompatible: bool,

    /// Target architecture recorded in the merged report
    #[arg(short, long, default_value = "arm64")]
    pub target: TargetArchitecture,
}
