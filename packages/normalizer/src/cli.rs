//! Command-line interface for the normalizer.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{collect_documents, run_batch, BatchOptions};
use crate::error::{NormalizerError, Result};
use crate::output::{render, save, OutputFormat};
use crate::pipeline::{transform_file, TransformMode};
use crate::xml::ParseOptions;

/// Bill normalizer - Turn legislative bill XML into clean nested JSON.
#[derive(Parser)]
#[command(name = "bill-normalizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Bill XML file, or a directory of XML files for batch mode
    pub input: PathBuf,

    /// Output file (default: standard output); required directory in batch mode
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print the parsed tree without normalizing or cleaning it
    #[arg(long)]
    pub raw: bool,

    /// Keep numeric and boolean element text as strings
    #[arg(long)]
    pub no_parse_values: bool,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            parse_values: !self.no_parse_values,
            ..ParseOptions::default()
        }
    }

    fn mode(&self) -> TransformMode {
        if self.raw {
            TransformMode::Raw
        } else {
            TransformMode::Clean
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.input.is_dir() {
        batch_command(&cli)
    } else {
        file_command(&cli)
    }
}

/// Transform a single file to stdout or to the output path.
fn file_command(cli: &Cli) -> Result<()> {
    let node = transform_file(&cli.input, &cli.parse_options(), cli.mode())?;

    match &cli.output {
        Some(output) => {
            let path = save(&node, output, cli.format)?;
            println!(
                "{} {}",
                style("Transformed XML saved to").green().bold(),
                path.display()
            );
        }
        None => {
            println!("{}", render(&node, cli.format)?);
            eprintln!("XML file successfully transformed.");
        }
    }

    Ok(())
}

/// Transform every XML file below the input directory.
fn batch_command(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .ok_or_else(|| NormalizerError::InvalidOutput {
            path: cli.input.clone(),
            reason: "batch mode requires an output directory".to_string(),
        })?;
    prepare_output_dir(output_dir)?;

    let documents = collect_documents(&cli.input)?;
    println!(
        "{} {} documents from {}",
        style("Transforming").bold(),
        style(documents.len()).cyan(),
        style(cli.input.display()).green()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let options = BatchOptions {
        parse: cli.parse_options(),
        mode: cli.mode(),
        format: cli.format,
    };
    let report = run_batch(&documents, &cli.input, output_dir, &options, |document| {
        if let Some(name) = document.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    println!("  Written: {}", style(report.written.len()).green());
    if !report.failures.is_empty() {
        println!("  Failed: {}", style(report.failures.len()).yellow().bold());
        for failure in &report.failures {
            println!("    {}: {}", failure.path.display(), failure.message);
        }
    }

    report.into_result().map(|_| ())
}

/// Make sure the batch output directory exists and is a directory.
fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(NormalizerError::InvalidOutput {
            path: output_dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    std::fs::create_dir_all(output_dir)?;
    Ok(())
}
