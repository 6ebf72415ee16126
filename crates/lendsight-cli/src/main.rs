mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analytics::AnalyticsArgs;
use commands::clients::ClientsArgs;
use commands::export::ExportArgs;
use commands::schedule::ScheduleArgs;

/// Synthetic loan-portfolio data for dashboards
#[derive(Parser)]
#[command(
    name = "lendsight",
    version,
    about = "Synthetic loan-portfolio data for dashboards",
    long_about = "Generates reproducible synthetic commercial real-estate loan portfolios: \
                  client and loan records with amortized balances, dashboard analytics, \
                  and CSV exports. The same seed and date always give the same output."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client and loan records
    Clients(ClientsArgs),
    /// Generate the dashboard analytics bundle
    Analytics(AnalyticsArgs),
    /// Export the analytics bundle as a directory of CSV files
    Export(ExportArgs),
    /// Print the amortization schedule of a single loan
    Schedule(ScheduleArgs),
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

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Clients(args) => commands::clients::run_clients(args),
        Commands::Analytics(args) => commands::analytics::run_analytics(args),
        Commands::Export(args) => commands::export::run_export(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("lendsight {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => match output::format_output(&cli.output, &value) {
            Ok(()) => process::exit(0),
            // The reader went away (`lendsight clients | head`)
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => process::exit(0),
            Err(e) => {
                eprintln!("{}: failed to write output: {}", "error".red().bold(), e);
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
