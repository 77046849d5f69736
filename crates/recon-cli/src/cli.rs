//! CLI argument definitions for the reconciliation engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recon",
    version,
    about = "Account mapping reconciliation engine",
    long_about = "Reconcile a source chart of accounts against a target chart.\n\n\
                  Ingests CSV charts, merges assistant mapping suggestions from\n\
                  transcript files, and exports the reconciled mapping table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest a source chart CSV into a reconciliation session.
    Ingest(IngestArgs),

    /// Apply assistant mapping suggestions from a transcript file.
    Apply(ApplyArgs),

    /// Export the reconciled mapping table as CSV.
    Export(ExportArgs),

    /// Show session status: counts, confidence, recent changes.
    Status(StatusArgs),
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Path to the source chart CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Session directory holding the persisted snapshot.
    #[arg(long = "session", value_name = "DIR")]
    pub session: PathBuf,

    /// Session identifier stamped into record metadata.
    #[arg(long = "session-id", value_name = "ID")]
    pub session_id: Option<String>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// File containing the assistant response text.
    #[arg(value_name = "RESPONSE_FILE")]
    pub response: PathBuf,

    /// Session directory holding the persisted snapshot.
    #[arg(long = "session", value_name = "DIR")]
    pub session: PathBuf,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path of the CSV file to write.
    #[arg(value_name = "OUT_CSV")]
    pub output: PathBuf,

    /// Session directory holding the persisted snapshot.
    #[arg(long = "session", value_name = "DIR")]
    pub session: PathBuf,
}

#[derive(Parser)]
pub struct StatusArgs {
    /// Session directory holding the persisted snapshot.
    #[arg(long = "session", value_name = "DIR")]
    pub session: PathBuf,

    /// Confidence at or above which a mapping counts as high confidence.
    #[arg(long = "threshold", value_name = "PCT", default_value_t = 80)]
    pub threshold: u8,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
