//! Stencil CLI - render a project from a template directory

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use stencil_core::{RunArgs, ScaffoldError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(about = "Render a project from a template directory of config defaults and templated files")]
#[command(version)]
pub struct Args {
    /// Template directory containing config.json and the files to render
    #[arg(short, long)]
    pub template: Option<OsString>,

    /// Directory to write rendered files into (defaults to the current directory)
    #[arg(short, long)]
    pub destination: Option<OsString>,

    /// Accept every default without prompting (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate flags and resolve relative paths against the working directory
    fn into_run_args(self) -> Result<RunArgs> {
        let template = non_empty(self.template).ok_or(ScaffoldError::MissingFlag {
            flag: "template",
        })?;

        let current_dir =
            std::env::current_dir().context("Failed to get current working directory")?;

        let destination = match self.destination {
            Some(dir) => non_empty(Some(dir)).ok_or(ScaffoldError::MissingFlag {
                flag: "destination",
            })?,
            None => current_dir.clone(),
        };

        Ok(RunArgs {
            template_dir: absolute(&current_dir, template),
            destination: absolute(&current_dir, destination),
            yes: self.yes,
        })
    }
}

/// Empty values count as missing; clap only checks presence
fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn absolute(current_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        current_dir.join(path)
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` picks debug over the warn default
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    match rust_log.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("warn"),
    }
}

fn setup_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .init();
}

fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    setup_logging(args.verbose);

    let result = args.into_run_args().and_then(stencil_core::run);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
