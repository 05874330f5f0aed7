//! dedupcopy - content-deduplicating copy
//!
//! Copies one file per distinct content from a source tree into a
//! destination tree, powered by the dedupcopy library.

use clap::{CommandFactory, Parser};
use dedupcopy::{DedupOptions, Error as DedupError, Outcome, RunStats, create_spinner, dedup};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// dedupcopy - copy a tree keeping one file per distinct content
///
/// Every file under --in is hashed; the first file with a given content is
/// copied to the same relative path under --out, later identical files are
/// skipped. Empty files and OS sidecar files (.DS_Store, Thumbs.db,
/// desktop.ini) are ignored.
#[derive(Parser, Debug)]
#[command(name = "dedupcopy", version, about, long_about = None)]
struct Args {
    /// Where the source files are
    #[arg(long = "in", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Where the deduplicated files will go
    #[arg(long = "out", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Verbose output: print every file and whether it is copied or skipped
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable the progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Additional file name to ignore, matched exactly (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("missing required argument --{0}")]
    MissingArgument(&'static str),

    #[error("{0}")]
    Dedup(#[from] DedupError),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingArgument(_) => "missing_argument",
            Self::Dedup(error) => error.code(),
        }
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

fn main() {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(error) if !error.use_stderr() => error.exit(),
        Err(error) => exit_with_usage(&error.to_string()),
    };

    match run(&args) {
        Ok(stats) => match stats.outcome() {
            Outcome::Copied(summary) => println!("{summary}"),
            Outcome::NothingCopied => {
                println!("Nothing happened?");
                std::process::exit(1);
            }
        },
        Err(error @ CliError::MissingArgument(_)) => exit_with_usage(&format!("error: {error}")),
        Err(error) => {
            eprintln!("error[{}]: {}", error.code(), error);
            std::process::exit(1);
        }
    }
}

/// Print `message` and the help text to stderr, then exit 1.
fn exit_with_usage(message: &str) -> ! {
    eprintln!("{}\n", message.trim_end());
    eprintln!("{}", Args::command().render_help());
    std::process::exit(1);
}

/// Logs go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> CliResult<RunStats> {
    let src = required(args.input.as_deref(), "in")?;
    let dst = required(args.output.as_deref(), "out")?;

    let options = build_options(args);

    let pb = if !args.verbose && !args.quiet {
        Some(create_spinner(src))
    } else {
        None
    };

    let result = dedup(src, dst, &options);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let stats = result?;
    tracing::debug!(
        files_copied = stats.files_copied,
        files_skipped = stats.files_skipped,
        duration = ?stats.duration,
        "run complete"
    );
    Ok(stats)
}

/// An empty path counts as missing.
fn required<'a>(path: Option<&'a Path>, name: &'static str) -> CliResult<&'a Path> {
    path.filter(|p| !p.as_os_str().is_empty())
        .ok_or(CliError::MissingArgument(name))
}

fn build_options(args: &Args) -> DedupOptions {
    let mut options = DedupOptions::default();
    for name in &args.ignore {
        options = options.with_ignored_name(name.clone());
    }
    if args.verbose {
        options = options.with_report_handler(|path, action| {
            println!("{:>50}: {}", path.display(), action);
        });
    }
    options
}
