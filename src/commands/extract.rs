use crate::config::{self, TrafficMinerConfig};
use crate::core::{OperationRecord, RunStats};
use crate::extraction::{BodyEncoding, ExtractionEngine, FilterPolicy};
use crate::formatting::ColorMode;
use crate::io::output::{create_writer, OutputFormat};
use crate::io::writers::{default_export_file_name, export_to_file};
use crate::io::{self, open_source, InputFormat};
use crate::progress::{ProgressConfig, ProgressManager};
use crate::scope::TargetScope;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Flags of the `extract` subcommand as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs {
    pub input: PathBuf,
    pub input_format: Option<InputFormat>,
    pub config: Option<PathBuf>,
    pub scope: Vec<String>,
    pub exclude: Vec<String>,
    pub no_graphql: bool,
    pub no_rest: bool,
    pub encoding: Option<BodyEncoding>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub export: bool,
    pub details: bool,
    pub color: ColorMode,
    pub quiet: bool,
    pub verbosity: u8,
}

/// Where the export document goes, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    None,
    File(PathBuf),
    /// A timestamped file in this directory
    Timestamped(PathBuf),
}

/// Fully resolved settings for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub encoding: BodyEncoding,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub policy: FilterPolicy,
    pub format: OutputFormat,
    pub export: ExportTarget,
    pub details: bool,
    pub color: ColorMode,
    pub quiet: bool,
    pub verbosity: u8,
}

impl ExtractConfig {
    /// Merge command-line flags over file configuration.
    pub fn resolve(args: ExtractArgs, file: &TrafficMinerConfig) -> Self {
        let scope = file.scope();
        let input = file.input();
        let file_policy = file.filter_policy();

        let include = if args.scope.is_empty() {
            scope.include
        } else {
            args.scope
        };
        let exclude = if args.exclude.is_empty() {
            scope.exclude
        } else {
            args.exclude
        };

        let policy = FilterPolicy::new(
            file_policy.include_graphql && !args.no_graphql,
            file_policy.include_rest && !args.no_rest,
        );

        let export = match (args.output, args.export) {
            (Some(path), _) => ExportTarget::File(path),
            (None, true) => {
                ExportTarget::Timestamped(file.export_dir().unwrap_or_else(|| PathBuf::from(".")))
            }
            (None, false) => ExportTarget::None,
        };

        Self {
            input: args.input,
            input_format: args.input_format.unwrap_or(input.format),
            encoding: args.encoding.unwrap_or(input.encoding),
            include,
            exclude,
            policy,
            format: args
                .format
                .or_else(|| file.default_format())
                .unwrap_or_default(),
            export,
            details: args.details,
            color: args.color,
            quiet: args.quiet,
            verbosity: args.verbosity,
        }
    }
}

pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let file_config = config::load_config(args.config.as_deref());
    let config = ExtractConfig::resolve(args, &file_config);
    config.color.apply();
    run_extract(&config)
}

pub fn run_extract(config: &ExtractConfig) -> Result<()> {
    let scope = TargetScope::from_patterns(&config.include, &config.exclude)
        .context("Invalid scope pattern")?;
    let source = open_source(&config.input, config.input_format, config.encoding);

    let progress = ProgressManager::new(ProgressConfig::from_env(config.quiet, config.verbosity));
    let bar = progress.transaction_bar("Mining history");

    let mut engine = ExtractionEngine::new()
        .with_encoding(config.encoding)
        .with_progress(bar.clone());

    let outcome = engine.run(source.as_ref(), &scope, config.policy);
    bar.finish_and_clear();
    progress.finish();

    let (records, stats) = outcome
        .with_context(|| format!("Failed to extract operations from {}", config.input.display()))?;

    let mut writer = create_writer(config.format, Box::new(std::io::stdout()), config.details);
    writer.write_results(records, &stats)?;

    export_records(records, &stats, &config.export)?;
    Ok(())
}

/// Export `records` to `target`. An empty result set is never written.
pub fn export_records(
    records: &[OperationRecord],
    stats: &RunStats,
    target: &ExportTarget,
) -> Result<Option<PathBuf>> {
    let path = match target {
        ExportTarget::None => return Ok(None),
        ExportTarget::File(path) => path.clone(),
        ExportTarget::Timestamped(dir) => {
            io::ensure_dir(dir)?;
            dir.join(default_export_file_name(chrono::Local::now()))
        }
    };

    if records.is_empty() {
        tracing::warn!(
            total = stats.total,
            "No operations to export; {} not written",
            path.display()
        );
        return Ok(None);
    }

    export_to_file(records, &path)?;
    report_export(&path, records.len());
    Ok(Some(path))
}

fn report_export(path: &Path, count: usize) {
    eprintln!("Exported {} operations to {}", count, path.display());
}
