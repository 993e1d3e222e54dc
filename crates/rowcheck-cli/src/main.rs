//! # rowcheck-cli
//!
//! Command-line interface for validating delimited data files.
//!
//! Reads a delimited file, checks every row against a declarative ruleset
//! and prints one line per finding.

mod ruleset;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, ensure};
use clap::{Parser, Subcommand, ValueEnum};

use rowcheck_core::{HeaderMode, RecordSource, RowValidator};
use rowcheck_csv::CsvConfig;

#[derive(Parser)]
#[command(name = "rowcheck")]
#[command(about = "Streaming validator for delimited data files")]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a delimited file against a ruleset
    Validate {
        /// Input file path
        input: String,

        /// Ruleset file path (.yaml, .yml or .json)
        #[arg(short, long)]
        rules: String,

        /// How to treat the first row
        #[arg(long, value_enum, default_value = "none")]
        header: HeaderArg,

        /// Field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Strip surrounding whitespace from each field before validation
        #[arg(long)]
        trim: bool,

        /// Output format for findings
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Treatment of the first row of the input file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeaderArg {
    /// The first row is data and is validated like any other
    Validate,
    /// The first row is discarded without validation
    Skip,
    /// There is no header row
    None,
}

/// Output format for findings
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per finding plus a summary
    Text,
    /// One JSON object per invalid row
    Json,
}

fn main() -> ExitCode {
    // Findings go to stdout; logs stay on stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<usize> {
    match cli.command {
        Commands::Validate {
            input,
            rules,
            header,
            delimiter,
            trim,
            format,
        } => {
            ensure!(
                delimiter.is_ascii(),
                "delimiter must be a single ASCII character"
            );
            tracing::info!("Validating {} against {}", input, rules);

            let schema = ruleset::load_schema(Path::new(&rules))
                .with_context(|| format!("Failed to load ruleset from {rules}"))?;

            let config = CsvConfig::new().delimiter(delimiter).trim(trim);
            let source = config
                .open(&input)
                .with_context(|| format!("Failed to open input file {input}"))?;

            let mut validator = RowValidator::new(&schema, source);
            validator.set_header_mode(match header {
                HeaderArg::Validate => HeaderMode::Validate,
                HeaderArg::Skip => HeaderMode::Skip,
                HeaderArg::None => HeaderMode::None,
            })?;

            report_stream(validator, format)
        }
    }
}

/// Drain the validator, print findings and return the invalid-row count.
fn report_stream<S: RecordSource>(
    mut validator: RowValidator<'_, S>,
    format: OutputFormat,
) -> anyhow::Result<usize> {
    let mut total = 0usize;
    let mut invalid = 0usize;

    for report in validator.rows() {
        let report = report.context("Failed to read a record from the input")?;
        total += 1;
        if report.is_valid {
            continue;
        }
        invalid += 1;
        match format {
            OutputFormat::Text => {
                for message in &report.error_messages {
                    println!("line {}: {message}", report.line_number);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
    }

    if format == OutputFormat::Text {
        if invalid == 0 {
            println!("Checked {total} rows: all valid.");
        } else {
            println!("Checked {total} rows: {invalid} invalid.");
        }
    }

    Ok(invalid)
}
