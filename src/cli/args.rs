//! CLI argument definitions for `edgebundle`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use edge_bundle::config::ConfigOverrides;
use edge_bundle::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `tension`, `out_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Draw the edge bundling diagram for a relationship CSV.
    ///
    /// Writes six radial panels, one per relationship category, plus a legend.
    Render {
        /// Relationship CSV (defaults to config `input`)
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,

        /// Output file path (defaults to `<out_dir>/<input stem>_bundle.<format>`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format: svg or html
        #[arg(short, long, value_name = "FORMAT", default_value = "svg")]
        format: String,

        /// Partition weighting: label or uniform (defaults to config `weighting`)
        #[arg(long, value_name = "WEIGHTING")]
        weighting: Option<String>,

        /// Bundle tension between 0 and 1 (defaults to config `tension`)
        #[arg(long, value_name = "TENSION")]
        tension: Option<f64>,

        /// Taxonomy path whose links are highlighted, e.g. "Spleen, Gr1"
        #[arg(long, value_name = "PATH")]
        highlight: Option<String>,
    },
    /// Print the taxonomy built from a relationship CSV.
    ///
    /// Each node is shown with its aggregated label weight.
    Tree {
        /// Relationship CSV (defaults to config `input`)
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "edgebundle",
    about = "Hierarchical edge bundling diagrams for taxonomy relationships",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config default input file
    #[arg(long = "config-input", value_name = "FILE")]
    pub config_input: Option<PathBuf>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--out-dir` takes precedence over `--config-out-dir` when both are given.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            input: self.config_input.as_ref().map(path_string),
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_input: None,
            config_out_dir: None,
            out_dir: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.input.is_none());
        assert!(overrides.out_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            config_input: Some(PathBuf::from("data/diff.csv")),
            out_dir: Some(PathBuf::from("/output")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.input, Some("data/diff.csv".to_string()));
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_out_dir: Some(PathBuf::from("/long/out")),
            out_dir: Some(PathBuf::from("/short/out")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().out_dir,
            Some("/short/out".to_string())
        );

        let cli = Cli {
            config_out_dir: Some(PathBuf::from("/long/out")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().out_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_render_args_parse() {
        let cli = Cli::try_parse_from([
            "edgebundle",
            "render",
            "diff.csv",
            "-f",
            "html",
            "--tension",
            "0.5",
            "--highlight",
            "Spleen, Gr1",
        ])
        .unwrap();
        match cli.command {
            Command::Render {
                input_file,
                format,
                tension,
                highlight,
                ..
            } => {
                assert_eq!(input_file, Some(PathBuf::from("diff.csv")));
                assert_eq!(format, "html");
                assert_eq!(tension, Some(0.5));
                assert_eq!(highlight.as_deref(), Some("Spleen, Gr1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
