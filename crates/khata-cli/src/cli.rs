//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use khata_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "truck-khata")]
#[command(author = "hriday")]
#[command(version)]
#[command(about = "Trip income and expense ledger for a small trucking operation")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new trip
    Add {
        /// Trip date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Truck registration number (e.g. "ঢাকা মেট্রো-ট ১১-২২৩৩")
        #[arg(long, short = 't')]
        truck: String,

        /// Fare received for the trip
        #[arg(long, short = 'i')]
        income: f64,

        /// Driver allowance
        #[arg(long, default_value_t = 0.0)]
        allowance: f64,

        /// Fuel cost
        #[arg(long, default_value_t = 0.0)]
        fuel: f64,

        /// Other expenses
        #[arg(long, default_value_t = 0.0)]
        other: f64,

        /// Trip description (route, cargo)
        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// Attach a photo; the image file is embedded into the ledger
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// List trips, newest first
    List {
        /// Filter by truck number or description
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Limit number of entries shown
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Delete a trip by id
    Delete {
        /// Trip id (as shown by list)
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show overall business totals
    Stats,

    /// Show per-truck performance, best earner first
    Trucks,

    /// Export the ledger as a CSV report
    Export {
        /// Output CSV file path (default: truck_report_<date>.csv)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set ledger directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set currency symbol
        #[arg(long)]
        set_currency: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
