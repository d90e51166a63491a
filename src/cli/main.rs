//! Command-line interface entry point for `edgebundle`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use edge_bundle::config::Config;
use edge_bundle::info;
use edge_bundle::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // `stored` is what `config` edits and saves; overrides only reach the
    // effective copy used for this run
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let config = stored.with_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let outcome = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut stored, &defaults);
            Ok(())
        }
        Command::Render {
            input_file,
            output,
            format,
            weighting,
            tension,
            highlight,
        } => commands::render::run(
            &commands::render::RenderRequest {
                input_file: input_file.as_deref(),
                output: output.as_deref(),
                format: &format,
                weighting: weighting.as_deref(),
                tension,
                highlight: highlight.as_deref(),
            },
            &config,
        ),
        Command::Tree { input_file } => commands::tree::run(input_file.as_deref(), &config),
    };

    if let Err(message) = outcome {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
