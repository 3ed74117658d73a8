//! CLI argument definitions for the tabview browser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabview_core::{Aggregation, DEFAULT_EXPAND_DEPTH, DEFAULT_SEPARATOR};
use tabview_model::ArithOp;

#[derive(Parser)]
#[command(
    name = "tabview",
    version,
    about = "Browse nested series, tables and cubes as one tree",
    long_about = "Load JSON and CSV data files into a workspace, browse them as a tree \
                  and pull any set of columns into one aligned table.\n\n\
                  Paths are written as names separated by '/', with '*' selecting \
                  every child at that level."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the tree outline of the loaded files.
    Tree(TreeArgs),

    /// Resolve a selection of paths into one table and print it.
    Select(SelectArgs),

    /// Add or subtract two data files and save the result as JSON.
    Combine(CombineArgs),

    /// Write random sample files to a directory.
    Generate(GenerateArgs),
}

#[derive(Args)]
pub struct TreeArgs {
    /// JSON or CSV files to load.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Levels shown before nodes are folded.
    #[arg(long = "depth", default_value_t = DEFAULT_EXPAND_DEPTH)]
    pub depth: usize,
}

#[derive(Args)]
pub struct SelectArgs {
    /// JSON or CSV files to load.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Tree path to select, e.g. `prices.csv/AAPL` or `panel.json/*/close`.
    #[arg(long = "path", short = 'p', value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Separator between nested collection names in column names.
    #[arg(long = "separator", default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Resample the result to this frequency (`1d`, `6h`, `30min`, or an integer width).
    #[arg(long = "resample", value_name = "FREQ")]
    pub resample: Option<String>,

    /// Aggregation used when resampling.
    #[arg(long = "agg", value_enum, default_value = "mean", requires = "resample")]
    pub aggregation: AggregationArg,
}

#[derive(Args)]
pub struct CombineArgs {
    #[arg(value_name = "LHS")]
    pub lhs: PathBuf,

    #[arg(value_name = "RHS")]
    pub rhs: PathBuf,

    #[arg(long = "op", value_enum, default_value = "add")]
    pub op: OpArg,

    /// Where to write the combined value.
    #[arg(long = "output", short = 'o', value_name = "OUT.json")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory to write the sample files into. Created if missing.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Seed for the random generator.
    #[arg(long = "seed", default_value_t = 0)]
    pub seed: u64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AggregationArg {
    Mean,
    Sum,
    Min,
    Max,
    First,
    Last,
}

impl From<AggregationArg> for Aggregation {
    fn from(arg: AggregationArg) -> Self {
        match arg {
            AggregationArg::Mean => Self::Mean,
            AggregationArg::Sum => Self::Sum,
            AggregationArg::Min => Self::Min,
            AggregationArg::Max => Self::Max,
            AggregationArg::First => Self::First,
            AggregationArg::Last => Self::Last,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OpArg {
    Add,
    Subtract,
}

impl From<OpArg> for ArithOp {
    fn from(arg: OpArg) -> Self {
        match arg {
            OpArg::Add => Self::Add,
            OpArg::Subtract => Self::Subtract,
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

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_select_collects_repeated_paths() {
        let cli = Cli::try_parse_from([
            "tabview", "select", "a.json", "b.csv", "-p", "a.json/*", "--path", "b.csv/x",
        ])
        .unwrap();
        let Command::Select(args) = cli.command else {
            panic!("expected select");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.paths, vec!["a.json/*", "b.csv/x"]);
        assert_eq!(args.separator, "/");
        assert!(args.resample.is_none());
    }

    #[test]
    fn test_log_flags_are_global() {
        let cli = Cli::try_parse_from([
            "tabview", "tree", "a.json", "--log-timestamps", "--log-format", "compact",
        ])
        .unwrap();
        assert!(cli.log_timestamps);
        assert!(matches!(cli.log_format, LogFormatArg::Compact));

        let cli = Cli::try_parse_from(["tabview", "tree", "a.json"]).unwrap();
        assert!(!cli.log_timestamps);
    }

    #[test]
    fn test_agg_requires_resample() {
        let result = Cli::try_parse_from([
            "tabview", "select", "a.json", "-p", "a.json", "--agg", "sum",
        ]);
        assert!(result.is_err());
    }
}
