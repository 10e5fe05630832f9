//! `minic` - command-line driver for the Mini compiler.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use minic_drv::{exit_code, run_all, Config};

/// Compile Mini source files and run them on the IR interpreter.
///
/// Each input is processed independently; its artifacts (token table, AST
/// tree, IR listings, interpreter output, error report) land in a
/// per-input directory.
#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiler and IR interpreter for the Mini language", long_about = None)]
struct Cli {
    /// Source files to compile and run
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory receiving one artifact subdirectory per input
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable color output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config {
        inputs: cli.inputs,
        out_dir: cli.out_dir,
    };

    let failure = run_all(&config).context("compilation aborted")?;
    Ok(match failure {
        Some(category) => ExitCode::from(exit_code(category)),
        None => ExitCode::SUCCESS,
    })
}

/// Initializes tracing with a fixed filter; the environment is not
/// consulted.
fn init_logging(verbose: bool, no_color: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let layer = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
