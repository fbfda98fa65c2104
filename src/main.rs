//! CLI entry point for gitwalk

use std::cell::Cell;
use std::io::{self, IsTerminal};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use gitwalk::{
    Explanation, GitWalker, JsonPrinter, LocalFs, OutputConfig, ParallelWalker, PathPrinter,
    WalkConfig, WalkEntry, WalkError, explain_path,
};
use termcolor::StandardStream;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gitwalk")]
#[command(about = "List a directory tree, skipping everything .gitignore files exclude")]
#[command(version)]
struct Args {
    /// Directory to walk
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Visit subdirectories before their parent
    #[arg(long = "bottom-up")]
    bottom_up: bool,

    /// Descend into symlinked directories
    #[arg(long = "follow-links")]
    follow_links: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Ignore files matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Name of the per-directory ignore file
    #[arg(long = "ignore-file", value_name = "NAME", default_value = gitwalk::walk::DEFAULT_IGNORE_FILE)]
    ignore_file: String,

    /// Print directories as well as files
    #[arg(short = 'd', long = "dirs")]
    dirs: bool,

    /// Print one JSON object per directory (dirpath, dirnames, filenames)
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Number of parallel workers
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Explain whether each PATH (relative to the walked directory) is ignored,
    /// and by which rule, instead of walking
    #[arg(long = "check", value_name = "PATH", num_args = 1..)]
    check: Vec<PathBuf>,
}

/// Where rendered results go.
enum Printer {
    Paths(PathPrinter<StandardStream>),
    Json(JsonPrinter<io::Stdout>),
}

impl Printer {
    fn print_entry(&mut self, entry: &WalkEntry) -> io::Result<()> {
        match self {
            Self::Paths(p) => p.print_entry(entry),
            Self::Json(p) => p.print_entry(entry),
        }
    }

    fn print_explanation(&mut self, explanation: &Explanation) -> io::Result<()> {
        match self {
            Self::Paths(p) => p.print_explanation(explanation),
            Self::Json(p) => p.print_explanation(explanation),
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let walk_config = WalkConfig {
        topdown: !args.bottom_up,
        follow_links: args.follow_links,
        max_depth: args.level,
        ignore_file_name: args.ignore_file.clone(),
        extra_patterns: args.ignore.clone(),
    };

    let mut printer = if args.json {
        Printer::Json(JsonPrinter::stdout())
    } else {
        Printer::Paths(PathPrinter::stdout(OutputConfig {
            use_color: should_use_color(args.color),
            show_dirs: args.dirs,
        }))
    };

    let result = if !args.check.is_empty() {
        run_check(&args, &walk_config, &mut printer)
    } else if args.jobs == 1 {
        run_sequential(&args.path, walk_config, &mut printer)
    } else {
        run_parallel(&args.path, walk_config, args.jobs, &mut printer)
    };

    if let Err(e) = result {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("gitwalk: error writing output: {}", e);
            process::exit(1);
        }
    }
}

/// Stream entries as the walk produces them.
fn run_sequential(root: &Path, config: WalkConfig, printer: &mut Printer) -> io::Result<()> {
    let root_failed = Cell::new(false);
    let walk = GitWalker::new(config)
        .with_error_handler(|e| {
            report_error(root, &e, &root_failed);
            ControlFlow::Continue(())
        })
        .walk(root);

    for entry in walk {
        printer.print_entry(&entry)?;
    }
    exit_if_root_failed(root_failed.get());
    Ok(())
}

fn run_parallel(
    root: &Path,
    config: WalkConfig,
    jobs: usize,
    printer: &mut Printer,
) -> io::Result<()> {
    let report = ParallelWalker::new(config).with_threads(jobs).collect(root);

    let root_failed = Cell::new(false);
    for e in &report.errors {
        report_error(root, e, &root_failed);
    }
    for entry in &report.entries {
        printer.print_entry(entry)?;
    }
    exit_if_root_failed(root_failed.get());
    Ok(())
}

fn run_check(args: &Args, config: &WalkConfig, printer: &mut Printer) -> io::Result<()> {
    for path in &args.check {
        let relative = path.strip_prefix(&args.path).unwrap_or(path.as_path());
        let full = args.path.join(relative);
        let is_dir = full.is_dir() || path.as_os_str().to_string_lossy().ends_with('/');

        match explain_path(&LocalFs, config, &args.path, relative, is_dir) {
            Ok(explanation) => printer.print_explanation(&explanation)?,
            Err(e) => {
                eprintln!("gitwalk: {}", e);
                process::exit(1);
            }
        }
    }
    Ok(())
}

/// Print a walk error, noting whether the root itself could not be listed.
fn report_error(root: &Path, error: &WalkError, root_failed: &Cell<bool>) {
    eprintln!("gitwalk: {}", error);
    let listing_failed = !matches!(
        error,
        WalkError::IgnoreFile { .. } | WalkError::SymlinkLoop { .. }
    );
    if listing_failed && error.path() == root {
        root_failed.set(true);
    }
}

fn exit_if_root_failed(failed: bool) {
    if failed {
        process::exit(1);
    }
}
