mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::scenario::{BaselineArgs, EvaluateArgs};

/// Inventory and demand what-if scenarios
#[derive(Parser)]
#[command(
    name = "invsim",
    version,
    about = "Inventory and demand what-if scenarios over a baseline financial snapshot",
    long_about = "Applies an order frequency, an annual inventory budget and a demand \
                  outlook to a baseline financial snapshot and compares the adjusted \
                  figures and liquidity/profitability ratios against the baseline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a scenario and compare baseline vs adjusted figures and ratios
    Evaluate(EvaluateArgs),
    /// Show the baseline snapshot and its ratios
    Baseline(BaselineArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::scenario::run_evaluate(args),
        Commands::Baseline(args) => commands::scenario::run_baseline(args),
        Commands::Version => {
            println!("invsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
