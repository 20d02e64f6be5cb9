//! CLI argument definitions for the KTutorial tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ktutorial",
    version,
    about = "KTutorial tools - Check, export and format tutorial files",
    long_about = "Work with KTutorial tutorial files without the editor.\n\n\
                  Tutorials are read from the XML working format and can be\n\
                  exported as scripts for the KTutorial runtime."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Export a tutorial as a script for the KTutorial runtime.
    Export(ExportArgs),

    /// Report the data an exported script would be missing.
    Check(CheckArgs),

    /// Show the steps and reactions of a tutorial.
    Inspect(InspectArgs),

    /// Rewrite a tutorial file in the canonical format.
    Format(FormatArgs),

    /// List the available exporter types.
    Exporters,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Tutorial file to export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Script file to write (default: <INPUT> with the exporter extension).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exporter type, as a file pattern.
    #[arg(long = "type", value_name = "PATTERN", default_value = "*.js")]
    pub exporter: String,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Tutorial file to check.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Tutorial file to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the outline as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct FormatArgs {
    /// Tutorial file to format.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// File to write (default: overwrite <INPUT>).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
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
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["ktutorial", "export", "tour.xml"]).unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.input, PathBuf::from("tour.xml"));
        assert_eq!(args.exporter, "*.js");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ktutorial",
            "check",
            "tour.xml",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_inspect_json_flag() {
        let cli = Cli::try_parse_from(["ktutorial", "inspect", "--json", "tour.xml"]).unwrap();
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert!(args.json);
    }
}
