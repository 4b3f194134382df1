//! tickbars CLI - clean CSV trade ticks and aggregate them into OHLCV bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickbars_lib::Interval;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::{FilterArgs, Format};

#[derive(Parser)]
#[command(name = "tickbars")]
#[command(about = "Clean CSV trade ticks and aggregate them into OHLCV bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate tick files into OHLCV bars
    Aggregate {
        /// Directory holding the tick CSV files
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "ohlcv_output.csv")]
        output: PathBuf,

        /// Start of the first bar (YYYY-MM-DD HH:MM[:SS])
        #[arg(short, long)]
        start: String,

        /// End of the window (YYYY-MM-DD HH:MM[:SS]), exclusive
        #[arg(short, long)]
        end: String,

        /// Bar width, e.g. 1h, 30m, 1d2h30m15s
        #[arg(long, default_value = "1h")]
        interval: Interval,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Write the cleaned ticks without aggregating them
    Clean {
        /// Directory holding the tick CSV files
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "clean_ticks.csv")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show how an interval string is read
    Interval {
        /// Interval text, e.g. 2h30m
        text: String,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Aggregate {
            input,
            output,
            start,
            end,
            interval,
            format,
            filter,
        } => {
            commands::aggregate::aggregate(
                input, output, &start, &end, interval, format, &filter, cli.quiet,
            )
            .await
        }
        Commands::Clean {
            input,
            output,
            format,
            filter,
        } => commands::clean::clean(input, output, format, &filter, cli.quiet).await,
        Commands::Interval { text } => {
            commands::interval::show_interval(&text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(["tickbars"].iter().chain(args).copied())
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_interval_flag_parsed() {
        let cli = parse(&[
            "aggregate", "-i", "data", "-s", "2024-09-16 09:30", "-e", "2024-09-16 16:00",
            "--interval", "2h30m",
        ])
        .unwrap();

        let Some(Commands::Aggregate { interval, .. }) = cli.command else {
            panic!("expected aggregate");
        };
        assert_eq!(interval.seconds(), 9_000);
    }

    #[test]
    fn test_interval_defaults_to_one_hour() {
        let cli = parse(&["aggregate", "-i", "data", "-s", "2024-09-16", "-e", "2024-09-17"])
            .unwrap();

        let Some(Commands::Aggregate { interval, .. }) = cli.command else {
            panic!("expected aggregate");
        };
        assert_eq!(interval, Interval::from_seconds(3_600));
    }

    #[test]
    fn test_zero_interval_rejected_by_parser() {
        let err = parse(&[
            "aggregate", "-i", "data", "-s", "2024-09-16 09:30", "-e", "2024-09-16 16:00",
            "--interval", "abc",
        ])
        .err()
        .unwrap();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
