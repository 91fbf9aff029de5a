//! Tasador CLI binary.
//!
//! Provides the command-line interface for the Tasador valuation pipeline.
//! Predictions go to stdout as a single JSON document; logs go to stderr.

mod cmd;
mod data;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::process;
use tasador_source::Source;
use tracing::Level;

use cmd::fields::list_fields;
use cmd::inspect::inspect_input;
use cmd::predict::{PredictOptions, run_predict};

#[derive(Parser)]
#[command(name = "tasador")]
#[command(about = "Two-stage stock valuation and price prediction", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the input batch and print predictions as JSON
    Predict {
        /// Input source (stdin or remote)
        #[arg(short, long, default_value = "stdin")]
        source: Source,

        /// Comma-separated stock ids to leave out of the final predictions
        /// (replaces the default list; pass "" for none)
        #[arg(long)]
        exclude: Option<String>,

        /// Seed for both model stages
        #[arg(long)]
        seed: Option<u64>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Summarize the input batch without training
    Inspect {
        /// Input source (stdin or remote)
        #[arg(short, long, default_value = "stdin")]
        source: Source,
    },

    /// List the input fields
    Fields {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show stages and descriptions
        #[arg(long)]
        detail: bool,
    },
}

const fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(log_level(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Predict {
            source,
            exclude,
            seed,
            pretty,
        } => {
            run_predict(PredictOptions {
                source,
                exclude,
                seed,
                pretty,
            })
            .await?;
        }
        Commands::Inspect { source } => {
            inspect_input(source).await?;
        }
        Commands::Fields { category, detail } => {
            list_fields(category, detail)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_predict_arguments() {
        let cli = Cli::parse_from(["tasador", "predict", "--source", "remote", "--exclude", "1,2", "--pretty"]);
        match cli.command {
            Commands::Predict {
                source,
                exclude,
                seed,
                pretty,
            } => {
                assert_eq!(source, Source::Remote);
                assert_eq!(exclude.as_deref(), Some("1,2"));
                assert_eq!(seed, None);
                assert!(pretty);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0, false), Level::INFO);
        assert_eq!(log_level(1, false), Level::DEBUG);
        assert_eq!(log_level(3, false), Level::TRACE);
        assert_eq!(log_level(2, true), Level::ERROR);
    }
}
