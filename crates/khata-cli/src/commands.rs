//! Command handlers

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use khata_app::export::{default_report_filename, export_trips_csv};
use khata_app::Config;
use khata_store::TripStore;
use khata_types::{Error, OutputFormat, Result, TripDraft};

use crate::cli::{Cli, Commands};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Add {
            date,
            truck,
            income,
            allowance,
            fuel,
            other,
            description,
            photo,
        } => cmd_add(
            &cli,
            &config,
            output_format,
            date.unwrap_or_else(|| Local::now().date_naive()),
            truck.clone(),
            *income,
            *allowance,
            *fuel,
            *other,
            description.clone(),
            photo.clone(),
        ),

        Commands::List { search, limit } => {
            cmd_list(&config, output_format, search.as_deref(), *limit)
        }

        Commands::Delete { id, yes } => cmd_delete(&config, id, *yes),

        Commands::Stats => cmd_stats(&config, output_format),

        Commands::Trucks => cmd_trucks(&config, output_format),

        Commands::Export { output } => cmd_export(&cli, &config, output.clone()),

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_currency,
            reset,
        } => cmd_config(
            *show,
            set_data_dir.clone(),
            *set_output,
            set_currency.clone(),
            *reset,
        ),
    }
}

fn open_store(config: &Config) -> Result<TripStore> {
    TripStore::open(config.data_dir()?)
}

fn cmd_add(
    cli: &Cli,
    config: &Config,
    output_format: OutputFormat,
    date: NaiveDate,
    truck: String,
    income: f64,
    allowance: f64,
    fuel: f64,
    other: f64,
    description: String,
    photo: Option<PathBuf>,
) -> Result<()> {
    let photo = match photo {
        Some(path) => Some(load_photo(&path)?),
        None => None,
    };

    let mut store = open_store(config)?;
    let trip = store.add(TripDraft {
        date,
        truck_number: truck,
        income,
        driver_allowance: allowance,
        fuel_cost: fuel,
        other_expenses: other,
        description,
        photo,
    })?;

    if cli.verbose {
        eprintln!("Ledger: {}", store.store_path().display());
    }

    println!("Trip recorded.");
    output::output_trip(output_format, &trip, &config.currency)?;
    Ok(())
}

/// Read an image file and embed it as a base64 data string, the shape the
/// old TruckKhata app stored photos in
fn load_photo(path: &PathBuf) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)?;
    image::load_from_memory(&bytes)?;

    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(&bytes)
    ))
}

fn cmd_list(
    config: &Config,
    output_format: OutputFormat,
    search: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let store = open_store(config)?;

    let trips: Vec<_> = match search {
        Some(query) => store.search(query),
        None => store.all().iter().collect(),
    };
    let shown = match limit {
        Some(n) => &trips[..trips.len().min(n)],
        None => &trips[..],
    };

    output::output_trip_list(output_format, shown, trips.len(), &config.currency)
}

fn cmd_delete(config: &Config, id: &str, yes: bool) -> Result<()> {
    let mut store = open_store(config)?;

    let Some(trip) = store.get(id) else {
        println!("No trip found with id {}", id);
        return Ok(());
    };

    if !yes {
        println!(
            "Delete trip {} ({}, {}, profit {})? [y/N]",
            trip.id,
            trip.date.format("%Y-%m-%d"),
            trip.truck_number,
            trip.net_profit
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if store.delete(id)? {
        println!("Trip deleted. {} trip(s) remaining.", store.count());
    }
    Ok(())
}

fn cmd_stats(config: &Config, output_format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    output::output_stats(output_format, &store.stats(), &config.currency)
}

fn cmd_trucks(config: &Config, output_format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    output::output_truck_stats(output_format, &store.truck_stats(), &config.currency)
}

fn cmd_export(cli: &Cli, config: &Config, output: Option<PathBuf>) -> Result<()> {
    let store = open_store(config)?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(default_report_filename(Local::now().date_naive())));

    if cli.verbose {
        eprintln!("Writing report to {}", path.display());
    }

    export_trips_csv(store.all(), &path)?;
    println!("Exported {} trip(s) to {}", store.count(), path.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_currency: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(currency) = set_currency {
        config.currency = currency;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
