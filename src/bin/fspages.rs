use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use statement_pages::{
    DEFAULT_SENSITIVITY, DetectOptions, DetectWarning, DetectionReport, MAX_SENSITIVITY,
    MIN_SENSITIVITY, PageSelection, detect_statement_pages, export_statement_tables_to_csv,
    extract_statement_text,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fspages",
    version,
    about = "Find the financial-statement pages of an annual report PDF"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the statement pages and their types.
    Detect(DetectArgs),
    /// Write the tables of the statement pages to CSV.
    Export(ExportArgs),
    /// Print the text of the statement pages only.
    Text(TextArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Detection sensitivity from 1 (lenient) to 10 (strict).
    #[arg(
        long,
        default_value_t = DEFAULT_SENSITIVITY,
        value_parser = clap::value_parser!(i32).range(i64::from(MIN_SENSITIVITY)..=i64::from(MAX_SENSITIVITY))
    )]
    sensitivity: i32,

    /// Print every warning instead of a count.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct DetectArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output CSV path.
    #[arg(short, long)]
    output: PathBuf,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,
}

#[derive(Debug, Args)]
struct TextArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn parse_options(common: &CommonArgs, delimiter: char) -> Result<DetectOptions> {
    let pages = common
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    if !delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(DetectOptions {
        pages,
        sensitivity: common.sensitivity,
        delimiter: delimiter as u8,
    })
}

fn log_warnings(warnings: &[DetectWarning], verbose: bool) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", warnings.len());
    if verbose {
        for warning in warnings {
            eprintln!(
                "  - {:?} page={:?}: {}",
                warning.code, warning.page, warning.message
            );
        }
    }
}

fn exit_code(report: &DetectionReport) -> ExitCode {
    if report.result.is_empty() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_detect(args: &DetectArgs) -> Result<DetectionReport> {
    let options = parse_options(&args.common, ',')?;
    let input = &args.common.input;
    let report = detect_statement_pages(input, &options)
        .with_context(|| format!("failed to classify pages of '{}'", input.display()))?;

    match args.format {
        OutputFormat::Text => print!("{}", report.summary()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(report)
}

fn run_export(args: &ExportArgs) -> Result<DetectionReport> {
    let options = parse_options(&args.common, args.delimiter)?;
    let input = &args.common.input;
    let export = export_statement_tables_to_csv(input, &args.output, &options)
        .with_context(|| format!("failed to export statement tables from '{}'", input.display()))?;

    eprintln!(
        "wrote {} row(s) from {} table(s) to '{}'",
        export.row_count,
        export.table_count,
        args.output.display()
    );
    Ok(export.detection)
}

fn run_text(args: &TextArgs) -> Result<DetectionReport> {
    let options = parse_options(&args.common, ',')?;
    let input = &args.common.input;
    let (text, report) = extract_statement_text(input, &options)
        .with_context(|| format!("failed to read statement text from '{}'", input.display()))?;

    if !text.is_empty() {
        println!("{text}");
    }
    Ok(report)
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("statement_pages=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let (outcome, verbose) = match &cli.command {
        Commands::Detect(args) => (run_detect(args), args.common.verbose),
        Commands::Export(args) => (run_export(args), args.common.verbose),
        Commands::Text(args) => (run_text(args), args.common.verbose),
    };

    match outcome {
        Ok(report) => {
            log_warnings(&report.warnings, verbose);
            exit_code(&report)
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
