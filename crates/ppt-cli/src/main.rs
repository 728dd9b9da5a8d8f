/// Command-line tool for legacy binary presentation streams: dump the
/// record tree, validate a whole presentation, or print its slide text.
///
/// # Command overview
///
/// ```text
/// pptrec <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the record tree of a raw document stream
///   validate   Decode a whole presentation and report the result
///   outline    Print the text of every slide
///   help       Print help information
///
/// Global options:
///   -v, --verbose        Debug logging on stderr
///   --log-json           Log as JSON lines
///   --max-depth <N>      Record nesting ceiling (default 64)
///   --max-edits <N>      User edit chain ceiling (default 4096)
///   -h, --help           Print help
///   -V, --version        Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                       |
/// |------|-----------------------------------------------|
/// | 0    | Success                                       |
/// | 1    | Error (I/O failure, corrupted record data)    |
///
/// Reports go to stdout; logs and errors go to stderr.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ppt_decoder::DecoderConfig;
use ppt_decoder::config::DEFAULT_MAX_EDITS;
use ppt_wire::{DEFAULT_MAX_DEPTH, Limits};
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_outline;
mod cmd_validate;
mod streams;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Legacy presentation record decoder.
#[derive(Parser)]
#[command(name = "pptrec", version, about = "Legacy presentation record decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder progress at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write log events as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Deepest record nesting accepted before the input is rejected.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Longest user edit chain followed before the input is rejected.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_EDITS)]
    max_edits: usize,
}

impl Cli {
    fn config(&self) -> DecoderConfig {
        DecoderConfig {
            limits: Limits {
                max_depth: self.max_depth,
            },
            max_edits: self.max_edits,
            ..DecoderConfig::default()
        }
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the record tree of a raw `PowerPoint Document` stream.
    Inspect(InspectArgs),
    /// Decode a whole presentation and report the result.
    Validate(PresentationArgs),
    /// Print the text of every slide, in slide list order.
    Outline(PresentationArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `pptrec inspect`.
///
/// Walks records without the catalog: containers are descended into,
/// atoms are listed with their header fields only.
///
/// ```text
/// ┌────────────┬─────────────────────────────────────────────────────┐
/// │ Flag       │ Effect                                              │
/// ├────────────┼─────────────────────────────────────────────────────┤
/// │ --offset N │ Walk only the record at byte N (decimal or 0x hex)  │
/// │ --json     │ Print the tree as JSON instead of an indented list  │
/// └────────────┴─────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the extracted document stream.
    pub stream: PathBuf,

    /// Walk the single record at this byte offset.
    #[arg(long, value_parser = parse_offset)]
    pub offset: Option<usize>,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

/// The two streams of a presentation, extracted to files.
#[derive(clap::Args)]
pub struct PresentationArgs {
    /// Path to the extracted `Current User` stream.
    #[arg(long)]
    pub current_user: PathBuf,

    /// Path to the extracted `PowerPoint Document` stream.
    #[arg(long)]
    pub document: PathBuf,
}

fn parse_offset(raw: &str) -> Result<usize, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|e| format!("invalid offset {raw:?}: {e}"))
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    let config = cli.config();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, &config),
        Commands::Validate(args) => cmd_validate::run(&args, &config),
        Commands::Outline(args) => cmd_outline::run(&args, &config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
