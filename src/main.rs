//! recdiff command-line interface.
//!
//! Reads a source and a target record collection (or bundles of collections
//! keyed by record type), compares them and prints the differences.
//!
//! Exit codes: 0 no differences, 1 differences or uncomparable records,
//! 2 error.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use recdiff::config::FormatSetting;
use recdiff::{
    check_types, compare_bundles, compare_collections, format_sections, logging, parse_file,
    parse_stdin, parser, Comparison, FormatHint, OutputFormat, RecordValue, Section, Settings,
    StatusFilter,
};
use std::path::{Path, PathBuf};
use std::process;

/// recdiff - structural diff for configuration records
///
/// Compares two keyed record collections (JSON, YAML or TOML) and reports
/// added, removed and modified records with their field-level differences.
#[derive(Parser)]
#[command(name = "recdiff")]
#[command(version)]
#[command(about = "Structural diff for keyed configuration records", long_about = None)]
struct Cli {
    /// Source collection file ("-" reads stdin)
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Target collection file ("-" reads stdin)
    #[arg(value_name = "TARGET")]
    target: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormatArg>,

    /// Hide rows whose source and target display identically
    #[arg(short = 'c', long)]
    only_changes: bool,

    /// Show only records with this kind of change
    #[arg(short = 's', long, value_enum)]
    status: Option<StatusArg>,

    /// Print field-level differences under each record
    #[arg(long)]
    show_fields: bool,

    /// Maximum length for displayed values
    #[arg(long)]
    max_value_length: Option<usize>,

    /// Reject records nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Inputs map record types to collections
    #[arg(short = 'b', long)]
    bundle: bool,

    /// Record type to compare (repeatable, requires --bundle)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Ignore field paths matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Only report field paths matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    only: Vec<String>,

    /// Settings file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for FormatSetting {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => FormatSetting::Terminal,
            OutputFormatArg::Json => FormatSetting::Json,
            OutputFormatArg::Plain => FormatSetting::Plain,
        }
    }
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

/// Status filter argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum StatusArg {
    All,
    Added,
    Removed,
    Modified,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Added => StatusFilter::Added,
            StatusArg::Removed => StatusFilter::Removed,
            StatusArg::Modified => StatusFilter::Modified,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let settings = merge_settings(&cli)?;
    if !settings.types.is_empty() && !settings.bundle {
        bail!("--type requires --bundle");
    }
    if is_stdin(&cli.source) && is_stdin(&cli.target) {
        bail!("only one input can be read from stdin");
    }

    let diff_config = settings.diff_config();
    let view = settings.view_options();

    let source = load(&cli.source).context("Failed to load source")?;
    let target = load(&cli.target).context("Failed to load target")?;
    let source_origin = cli.source.to_string_lossy();
    let target_origin = cli.target.to_string_lossy();

    tracing::info!("Computing diff...");

    let comparisons: Vec<(Option<String>, Comparison)> = if settings.bundle {
        let source = parser::bundle_from_value(source, &source_origin)?;
        let target = parser::bundle_from_value(target, &target_origin)?;
        check_types(&source, &target, &settings.types)?;
        compare_bundles(&source, &target, &settings.types, &diff_config)
            .into_iter()
            .map(|(record_type, comparison)| (Some(record_type), comparison))
            .collect()
    } else {
        let source = parser::collection_from_value(source, &source_origin)?;
        let target = parser::collection_from_value(target, &target_origin)?;
        vec![(None, compare_collections(&source, &target, &diff_config))]
    };

    let sections: Vec<Section> = comparisons
        .iter()
        .map(|(record_type, comparison)| Section::new(record_type.clone(), comparison, &view))
        .collect();

    let output = format_sections(
        &sections,
        &settings.output_format(),
        &settings.output_options(),
    )
    .context("Failed to format diff output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    if comparisons.iter().all(|(_, comparison)| comparison.is_empty()) {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Settings file first, then command-line flags on top.
fn merge_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    settings.only_changes |= cli.only_changes;
    settings.show_fields |= cli.show_fields;
    settings.bundle |= cli.bundle;
    if let Some(status) = cli.status {
        settings.status = Some(status.into());
    }
    if let Some(max_value_length) = cli.max_value_length {
        settings.max_value_length = Some(max_value_length);
    }
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = Some(max_depth);
    }
    settings.types.extend(cli.types.iter().cloned());
    settings.ignore.extend(cli.ignore.iter().cloned());
    settings.only.extend(cli.only.iter().cloned());
    if let Some(format) = cli.format {
        settings.format = Some(format.into());
    }
    settings.validate()?;

    Ok(settings)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn load(path: &Path) -> Result<RecordValue> {
    if is_stdin(path) {
        tracing::info!("Parsing <stdin>...");
        return Ok(parse_stdin(FormatHint::Auto)?);
    }

    tracing::info!("Parsing {}...", path.display());
    Ok(parse_file(path)?)
}
