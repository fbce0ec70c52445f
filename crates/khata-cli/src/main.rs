//! Truck Khata - trip income and expense ledger
//!
//! A CLI tool for recording trips and deriving profitability reports for a
//! small trucking operation.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
