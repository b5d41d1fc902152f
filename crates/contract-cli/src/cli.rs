//! CLI argument definitions for the contract cleaner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use contract_model::ResolutionPolicy;

#[derive(Parser)]
#[command(
    name = "contract-clean",
    version,
    about = "Repair reversed and overlapping supplier contract intervals",
    long_about = "Repair reversed and overlapping supplier contract intervals.\n\n\
                  Contracts are grouped by supplier and product. Reversed start/end \
                  dates are swapped, and rows overlapping an earlier contract of \
                  the same group are resolved by the selected policy."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include supplier names and reference numbers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a contract CSV file and write the result.
    Clean(CleanArgs),

    /// Report reversed and overlapping rows without writing anything.
    ///
    /// Exits with status 1 when defects are found.
    Check(CheckArgs),
}

#[derive(Args)]
pub struct CleanArgs {
    /// Contract CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>.cleaned.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overlap resolution policy (overrides the config file).
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Only repair reversed intervals; leave overlaps in place.
    #[arg(long = "no-overlap")]
    pub no_overlap: bool,

    /// Clean and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// TOML file with cleaning options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Contract CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML file with cleaning options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    DropExtras,
    ExtendAndDrop,
    ExtendPerGroup,
}

impl From<PolicyArg> for ResolutionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::DropExtras => ResolutionPolicy::DropExtras,
            PolicyArg::ExtendAndDrop => ResolutionPolicy::ExtendAndDrop,
            PolicyArg::ExtendPerGroup => ResolutionPolicy::ExtendPerGroup,
        }
    }
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
