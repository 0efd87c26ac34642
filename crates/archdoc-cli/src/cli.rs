//! CLI argument definitions for the documentation generator.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "archdoc",
    version,
    about = "Project Documentation Generator - analyze a source folder and export a PDF",
    long_about = "Submit a source folder to the analysis service and export the resulting\n\
                  project documentation as a paginated PDF.\n\n\
                  The export strategy (client capture or server generated) is fixed per\n\
                  deployment in the config file."
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

    /// Deployment config file (default: <config dir>/archdoc/config.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a source folder and export its documentation.
    Generate(GenerateArgs),

    /// Export documentation from a saved analyzer response.
    Render(RenderArgs),
}

/// Options shared by every command that exports.
#[derive(Args)]
pub struct ExportArgs {
    /// Export strategy (overrides the config file).
    #[arg(long = "strategy", value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Directory for the exported PDF (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the rendered document as SVG.
    #[arg(long = "svg", value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Show the document summary without exporting.
    #[arg(long = "no-export")]
    pub no_export: bool,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Source folder to analyze, as seen by the analysis service.
    #[arg(value_name = "SOURCE_PATH", value_parser = NonEmptyStringValueParser::new())]
    pub source_path: String,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// JSON file holding an analyzer success response.
    #[arg(value_name = "PAYLOAD_JSON")]
    pub payload: PathBuf,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Client,
    Server,
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
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_empty_source_path_is_rejected() {
        assert!(Cli::try_parse_from(["archdoc", "generate", ""]).is_err());
        assert!(Cli::try_parse_from(["archdoc", "generate", "D:/demo"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "archdoc",
            "render",
            "payload.json",
            "--strategy",
            "server",
            "--log-format",
            "json",
            "--no-export",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert!(matches!(args.export.strategy, Some(StrategyArg::Server)));
        assert!(args.export.no_export);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }
}
