//! xlnorm CLI - normalized Excel workbook extraction
//!
//! Extracts a single workbook, a directory of workbooks, or serves
//! extraction requests for an orchestrator.

use clap::{ArgAction, Parser};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;
use xlnorm::{batch, service, ExtractOptions, FileOutcome};

/// Normalized extraction of Excel workbooks to canonical JSON
#[derive(Parser)]
#[command(
    name = "xlnorm",
    author = "iyulab",
    version,
    about = "Extract normalized records from Excel workbooks",
    long_about = "xlnorm - normalized extraction of Excel workbooks.\n\n\
                  Converts XLSX files (cells, styles, tables, conditional formatting,\n\
                  package metadata) to compact JSON, gzipped by default."
)]
struct Cli {
    /// Input workbook or directory of workbooks
    #[arg(short, long, required_unless_present = "server")]
    input: Option<PathBuf>,

    /// Output file, or directory for `<name>.input.json[.gz]` records
    #[arg(short, long, required_unless_present = "server")]
    output: Option<PathBuf>,

    /// Write gzipped output
    #[arg(
        long,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    gzip: bool,

    /// Print a status line for every file
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    verbose: bool,

    /// Connect to an orchestrator at host:port and serve requests
    #[arg(long, value_name = "HOST:PORT", conflicts_with_all = ["input", "output"])]
    server: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether every file succeeded.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let options = ExtractOptions::new()
        .with_gzip(cli.gzip)
        .with_verbose(cli.verbose);

    if let Some(endpoint) = cli.server {
        service::run(&endpoint, &options)?;
        return Ok(true);
    }

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        return Err("Must specify \"input\" and \"output\", or \"server\"".into());
    };

    if input.is_dir() {
        run_directory(&input, &output, &options)
    } else {
        Ok(run_file(&input, &output, &options))
    }
}

fn run_file(input: &Path, output: &Path, options: &ExtractOptions) -> bool {
    let outcome = batch::process_file(input, output, options, |message| {
        eprintln!("{}", message);
        Ok(())
    });

    match outcome {
        FileOutcome::Written(path) => {
            if options.verbose {
                println!("{} Extracted: {}", "✓".green().bold(), path.display());
            }
            true
        }
        FileOutcome::Failed(_) => false,
    }
}

fn run_directory(
    input: &Path,
    output: &Path,
    options: &ExtractOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    let files = batch::find_workbooks(input);
    let pb = create_progress_bar(files.len() as u64);
    let failures = AtomicUsize::new(0);

    let report = batch::process_workbooks(&files, input, output, options, |file, outcome| {
        if outcome.is_failure() {
            failures.fetch_add(1, Ordering::Relaxed);
        }
        pb.set_message(
            file.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
        );
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    let failed = failures.load(Ordering::Relaxed);
    if report.failed {
        println!(
            "{} {} of {} workbooks failed, see the .error files in {}",
            "!".yellow().bold(),
            failed,
            report.total,
            output.display()
        );
    } else {
        println!(
            "{} Extracted {} workbooks to {}",
            "✓".green().bold(),
            report.total,
            output.display()
        );
    }

    Ok(!report.failed)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_defaults() {
        let cli = Cli::try_parse_from(["xlnorm", "-i", "a.xlsx", "-o", "out"]).unwrap();
        assert!(cli.gzip);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_bool_flags_take_optional_values() {
        let cli = Cli::try_parse_from([
            "xlnorm", "-i", "a.xlsx", "-o", "out", "--gzip", "false", "--verbose",
        ])
        .unwrap();
        assert!(!cli.gzip);
        assert!(cli.verbose);
    }

    #[test]
    fn test_server_excludes_paths() {
        assert!(Cli::try_parse_from(["xlnorm", "--server", "127.0.0.1:9000"]).is_ok());
        assert!(Cli::try_parse_from(["xlnorm", "--server", "h:1", "-i", "a.xlsx"]).is_err());
        assert!(Cli::try_parse_from(["xlnorm", "-i", "a.xlsx"]).is_err());
    }
}
