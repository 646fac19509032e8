mod cli;
mod config;

use arm_compat::adapters::outbound::console::{render_summary, StderrProgressReporter};
use arm_compat::adapters::outbound::evidence::{
    RegistryInspector, RuntimeReportReader, ZipArchiveInspector,
};
use arm_compat::adapters::outbound::filesystem::FileSystemReader;
use arm_compat::adapters::outbound::network::{CachingPackageLookup, MavenCentralClient};
use arm_compat::application::context::AnalysisContext;
use arm_compat::application::dto::OutputFormat;
use arm_compat::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use arm_compat::application::read_models::ReportReadModelBuilder;
use arm_compat::application::use_cases::{
    AnalyzeSbomUseCase, EvidenceCollector, MergeReportsUseCase,
};
use arm_compat::compatibility::domain::{AnalysisResult, TargetArchitecture};
use arm_compat::compatibility::services::{
    DenyListOverlay, KnowledgeBaseStore, Matcher, NameNormalizer,
};
use arm_compat::ports::outbound::{DocumentReader, ProgressReporter};
use arm_compat::shared::error::ExitCode;
use arm_compat::shared::Result;
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command, MergeArgs};
use config::{AnalyzeSettings, ConfigFile};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const JSON_EXTENSIONS: &[&str] = &[".json"];

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with exit code 0
            let _ = e.print();
            process::exit(e.exit_code());
        }
    };

    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => exit_with_error(e.into()),
    };

    let outcome = runtime.block_on(async {
        tokio::select! {
            result = run(cli.command) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        }
    });

    match outcome {
        Some(Ok(code)) => process::exit(code.as_i32()),
        Some(Err(e)) => exit_with_error(e),
        None => {
            eprintln!("\n⚠️  Interrupted, no report was written");
            process::exit(ExitCode::Interrupted.as_i32());
        }
    }
}

fn exit_with_error(e: anyhow::Error) -> ! {
    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", e);

    // Display error chain
    for cause in e.chain().skip(1) {
        eprintln!("\nCaused by: {}", cause);
    }

    eprintln!();
    process::exit(ExitCode::ApplicationError.as_i32());
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("arm_compat=debug")
    } else {
        EnvFilter::new("arm_compat=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Analyze(args) => run_analyze(args).await,
        Command::Merge(args) => run_merge(args),
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    let config = match args.config.as_deref() {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            config
        }
        None => match config::discover_config(&std::env::current_dir()?)? {
            Some(config) => {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
                config
            }
            None => ConfigFile::default(),
        },
    };
    let mut settings = AnalyzeSettings::resolve(args, config)?;

    let reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();

    if let Some(dir) = settings.sbom_directory.as_deref() {
        let found = reader.list_documents(dir, JSON_EXTENSIONS)?;
        info!(directory = %dir.display(), documents = found.len(), "Discovered SBOM documents");
        settings.request.sbom_paths.extend(found);
    }
    if settings.request.sbom_paths.is_empty() {
        anyhow::bail!("No SBOM documents were found to analyze");
    }

    let context = build_context(&reader, &progress_reporter, &settings)?;
    let collector = build_evidence_collector(&context, &settings)?;
    let runtime_evidence =
        load_runtime_evidence(&reader, &progress_reporter, &settings.runtime_results);

    let target = context.target();
    let mut use_case = AnalyzeSbomUseCase::new(reader, progress_reporter, context)
        .with_evidence_collector(collector);
    if let Some(source) = runtime_evidence {
        use_case = use_case.with_runtime_evidence(Box::new(source));
    }

    let result = use_case.execute(settings.request.clone()).await?;
    write_report(&result, target, settings.format, settings.output.clone())?;
    Ok(exit_code_for(&result, settings.fail_on_incompatible))
}

fn run_merge(args: MergeArgs) -> Result<ExitCode> {
    let reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();
    let runtime_evidence =
        load_runtime_evidence(&reader, &progress_reporter, &args.runtime_results);

    let mut use_case = MergeReportsUseCase::new(reader, progress_reporter);
    if let Some(source) = runtime_evidence {
        use_case = use_case.with_runtime_evidence(Box::new(source));
    }

    let result = use_case.execute(&args.reports)?;
    write_report(&result, args.target, args.format, args.output)?;
    Ok(exit_code_for(&result, args.fail_on_incompatible))
}

/// Builds the knowledge base, deny list and matcher shared by every document.
fn build_context(
    reader: &FileSystemReader,
    progress_reporter: &dyn ProgressReporter,
    settings: &AnalyzeSettings,
) -> Result<AnalysisContext> {
    let kb_documents = read_documents(
        reader,
        progress_reporter,
        &settings.knowledge_bases,
        settings.knowledge_base_dir.as_deref(),
        "knowledge base",
    )?;
    let normalizer = NameNormalizer::new(settings.extra_suffixes.iter().cloned());
    let (store, load_report) =
        KnowledgeBaseStore::load(normalizer, kb_documents, settings.use_builtin_knowledge_base);
    for error in &load_report.errors {
        progress_reporter.report_error(&format!("⚠️  Warning: {}", error));
    }
    if load_report.used_builtin {
        progress_reporter.report("📚 Using built-in knowledge base");
    }
    progress_reporter.report(&format!(
        "📚 Knowledge base ready: {} record(s) from {} document(s)",
        store.len(),
        load_report.documents_loaded
    ));

    let deny_documents = read_documents(
        reader,
        progress_reporter,
        &settings.deny_lists,
        settings.deny_list_dir.as_deref(),
        "deny list",
    )?;
    let (deny_list, deny_errors) = DenyListOverlay::load(deny_documents);
    for error in &deny_errors {
        progress_reporter.report_error(&format!("⚠️  Warning: {}", error));
    }

    Ok(AnalysisContext::new(
        store,
        deny_list,
        Matcher::new(settings.fuzzy),
        settings.target,
    ))
}

/// Archive inspection first, then the (opt-in) Maven Central lookup.
fn build_evidence_collector(
    context: &AnalysisContext,
    settings: &AnalyzeSettings,
) -> Result<EvidenceCollector> {
    let mut collector = EvidenceCollector::new(settings.evidence);

    let mut archives = ZipArchiveInspector::new(context.scanner());
    for archive in &settings.archives {
        archives = archives.with_archive(archive.clone())?;
    }
    if let Some(dir) = settings.archive_dir.as_deref() {
        archives = archives.with_directory(dir)?;
    }
    if !archives.is_empty() {
        info!(archives = archives.len(), "Indexed distributable archives");
        collector = collector.with_inspector(Arc::new(archives));
    }

    if settings.maven_lookup {
        let lookup = CachingPackageLookup::new(MavenCentralClient::new()?);
        collector = collector.with_inspector(Arc::new(RegistryInspector::new(
            lookup,
            context.scanner(),
            "Maven Central",
        )));
    }

    Ok(collector)
}

/// Runtime result documents that fail to load are reported and skipped.
fn load_runtime_evidence(
    reader: &FileSystemReader,
    progress_reporter: &dyn ProgressReporter,
    paths: &[PathBuf],
) -> Option<RuntimeReportReader> {
    if paths.is_empty() {
        return None;
    }

    let documents = paths.iter().filter_map(|path| {
        read_one(reader, progress_reporter, path, "runtime results")
    });
    let (runtime_reader, errors) = RuntimeReportReader::from_documents(documents);
    for error in &errors {
        progress_reporter.report_error(&format!("⚠️  Warning: {}", error));
    }
    info!(results = runtime_reader.len(), "Loaded runtime test results");
    Some(runtime_reader)
}

/// Reads the named documents, then every `.json` document in `dir`.
///
/// An unreadable file is reported and skipped like an unparsable one; an
/// unreadable directory fails the run.
fn read_documents(
    reader: &FileSystemReader,
    progress_reporter: &dyn ProgressReporter,
    files: &[PathBuf],
    dir: Option<&Path>,
    description: &str,
) -> Result<Vec<(String, String)>> {
    let mut paths = files.to_vec();
    if let Some(dir) = dir {
        paths.extend(reader.list_documents(dir, JSON_EXTENSIONS)?);
    }

    Ok(paths
        .iter()
        .filter_map(|path| read_one(reader, progress_reporter, path, description))
        .collect())
}

fn read_one(
    reader: &FileSystemReader,
    progress_reporter: &dyn ProgressReporter,
    path: &Path,
    description: &str,
) -> Option<(String, String)> {
    match reader.read_document(path, description) {
        Ok(content) => Some((path.display().to_string(), content)),
        Err(e) => {
            warn!(document = %path.display(), error = %e, "Skipping unreadable {}", description);
            progress_reporter.report_error(&format!(
                "⚠️  Warning: skipping {} {}: {}",
                description,
                path.display(),
                e
            ));
            None
        }
    }
}

fn write_report(
    result: &AnalysisResult,
    target: TargetArchitecture,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    eprintln!("{}", FormatterFactory::progress_message(format));
    let read_model = ReportReadModelBuilder::build(result, target);
    let formatted_output = FormatterFactory::create(format).format(&read_model)?;

    let presenter = PresenterFactory::create(PresenterType::from(output));
    presenter.present(&formatted_output)?;

    let stderr = std::io::stderr();
    eprint!("{}", render_summary(&result.summary(), stderr.is_terminal()));
    Ok(())
}

fn exit_code_for(result: &AnalysisResult, fail_on_incompatible: bool) -> ExitCode {
    if fail_on_incompatible && result.has_incompatible() {
        ExitCode::IncompatibleComponents
    } else {
        ExitCode::Success
    }
}
