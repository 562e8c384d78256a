//! Primos Marketplace Fee CLI
//!
//! Operator tool for checking fee breakdowns:
//! - quote: full breakdown for one listing price
//! - table: summary rows for several prices
//! - rates: the fixed fee rate table

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use fee_calculator::display::{SOL_DISPLAY_DECIMALS, SOL_MAX_DISPLAY_DECIMALS};
use fee_calculator::rates::{BPS_DENOMINATOR, TOTAL_FEE_BPS};
use fee_calculator::{format_sol, FeeComponent, PriceBreakdown};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "fee-cli")]
#[command(about = "Marketplace fee breakdowns for listing prices")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full fee breakdown for a listing price in SOL
    Quote {
        /// Listing price in SOL
        #[arg(allow_negative_numbers = true)]
        price: f64,

        /// SOL/USD rate for USD columns
        #[arg(long)]
        sol_usd: Option<f64>,

        /// Decimals shown for SOL amounts (max 4)
        #[arg(short, long, default_value_t = SOL_DISPLAY_DECIMALS)]
        decimals: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Summary row for each listing price
    Table {
        /// Listing prices in SOL
        #[arg(required = true, allow_negative_numbers = true)]
        prices: Vec<f64>,
    },

    /// Fixed fee rates
    Rates,
}

#[derive(Serialize)]
struct QuoteOutput<'a> {
    #[serde(flatten)]
    breakdown: &'a PriceBreakdown,
    display: Vec<fee_calculator::BreakdownLine>,
}

fn print_quote(breakdown: &PriceBreakdown, decimals: u32, json: bool) -> Result<()> {
    let lines = breakdown.lines_with_decimals(decimals);

    if json {
        let output = QuoteOutput { breakdown, display: lines };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Fee breakdown".bold().underline());
    let last = lines.len() - 1;
    for (i, line) in lines.iter().enumerate() {
        let usd = line.usd.as_deref().unwrap_or("");
        let row = format!("{:<20} {:>18} {:>14}", line.label, line.sol, usd);
        if i == last {
            println!("{}", row.green().bold());
        } else if i == 0 {
            println!("{}", row.bold());
        } else {
            println!("{}", row);
        }
    }
    Ok(())
}

fn print_table(prices: &[f64]) -> Result<()> {
    println!(
        "{}",
        format!("{:>16} {:>16} {:>18} {:>16}", "Price", "Total fees", "Seller receives", "Buyer pays")
            .bold()
    );
    for &price in prices {
        let breakdown = PriceBreakdown::new(price)?;
        println!(
            "{:>16} {:>16} {:>18} {:>16}",
            format_sol(breakdown.price, SOL_MAX_DISPLAY_DECIMALS),
            format_sol(breakdown.fees.total_fees, SOL_MAX_DISPLAY_DECIMALS),
            format_sol(breakdown.fees.seller_receives, SOL_MAX_DISPLAY_DECIMALS),
            format_sol(breakdown.buyer_total, SOL_MAX_DISPLAY_DECIMALS),
        );
    }
    Ok(())
}

fn print_rates() {
    println!("{}", format!("{:<20} {:>6} {:>8}", "Component", "bps", "rate").bold());
    for component in FeeComponent::ALL {
        println!(
            "{:<20} {:>6} {:>7.2}%",
            component.label(),
            component.bps(),
            component.rate() * 100.0
        );
    }
    let total = format!(
        "{:<20} {:>6} {:>7.2}%",
        "Total",
        TOTAL_FEE_BPS,
        TOTAL_FEE_BPS as f64 * 100.0 / BPS_DENOMINATOR as f64
    );
    println!("{}", total.bold());
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Quote { price, sol_usd, decimals, json } => {
            let mut breakdown = PriceBreakdown::new(price)?;
            if let Some(rate) = sol_usd {
                breakdown = breakdown.with_usd_rate(rate)?;
            }
            debug!("Quoting price {} with rate {:?}", price, sol_usd);
            print_quote(&breakdown, decimals, json)
        }
        Commands::Table { prices } => print_table(&prices),
        Commands::Rates => {
            print_rates();
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
