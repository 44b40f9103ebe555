mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogArgs;
use commands::sensitivity::SensitivityArgs;
use commands::tranches::{DebtTranchesArgs, PreferredTranchesArgs};
use commands::treasury::TreasuryArgs;

/// Bitcoin treasury coverage analytics
#[derive(Parser)]
#[command(
    name = "btct",
    version,
    about = "Bitcoin treasury coverage analytics",
    long_about = "A CLI for bitcoin-treasury coverage analysis with decimal precision. \
                  Ranks debt and preferred instruments by seniority, computes per-tranche \
                  coverage, risk and credit spread proxies, entity-level treasury metrics, \
                  and price/holdings sensitivity grids."
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
    /// Full coverage report: tranches plus entity-level treasury metrics
    Treasury(TreasuryArgs),
    /// Per-tranche metrics for the debt waterfall
    DebtTranches(DebtTranchesArgs),
    /// Per-tranche metrics for the preferred stack
    PreferredTranches(PreferredTranchesArgs),
    /// Coverage sensitivity grid over holdings x price
    Sensitivity(SensitivityArgs),
    /// Dump the built-in reference catalogs
    Catalog(CatalogArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Treasury(args) => commands::treasury::run_treasury(args),
        Commands::DebtTranches(args) => commands::tranches::run_debt_tranches(args),
        Commands::PreferredTranches(args) => commands::tranches::run_preferred_tranches(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("btct {}", env!("CARGO_PKG_VERSION"));
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
