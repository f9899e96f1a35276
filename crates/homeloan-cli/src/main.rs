mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::mortgage::{AffordabilityArgs, CalculateArgs, CompareArgs, ScheduleArgs};

/// Mortgage EMI, affordability and lender comparison
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Mortgage EMI, affordability and lender comparison",
    long_about = "A CLI for fixed-rate home loan calculations with decimal precision. \
                  Computes equated monthly installments, total interest, affordability \
                  tiers, lender comparison tables and amortization schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places for table, csv, minimal and yaml output
    #[arg(long, default_value = "2", global = true)]
    decimals: u32,

    /// Log calculation details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// EMI, totals and optional affordability for a property purchase
    Calculate(CalculateArgs),
    /// Classify an EMI against monthly income
    Affordability(AffordabilityArgs),
    /// Compare lenders at a fixed loan amount and tenure
    Compare(CompareArgs),
    /// Year-by-year amortization schedule
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
    Yaml,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "homeloan_cli=debug,homeloan_core=debug"
        } else {
            "warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Affordability(args) => commands::mortgage::run_affordability(args),
        Commands::Compare(args) => commands::mortgage::run_compare(args),
        Commands::Schedule(args) => commands::mortgage::run_schedule(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, cli.decimals);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
