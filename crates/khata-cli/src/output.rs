//! Output formatting module

use khata_types::{BusinessStats, OutputFormat, Result, Trip, TruckStats};

pub fn output_trip(output_format: OutputFormat, trip: &Trip, currency: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(trip)?;
        println!("{}", content);
    } else {
        println!("\nTrip");
        println!("====");
        println!("Id:              {}", trip.id);
        println!("Date:            {}", trip.date.format("%Y-%m-%d"));
        println!("Truck:           {}", trip.truck_number);
        if !trip.description.is_empty() {
            println!("Description:     {}", trip.description);
        }
        println!("Income:          {}{}", currency, trip.income);
        println!("Allowance:       {}{}", currency, trip.driver_allowance);
        println!("Fuel:            {}{}", currency, trip.fuel_cost);
        println!("Other:           {}{}", currency, trip.other_expenses);
        println!("Total expense:   {}{}", currency, trip.total_expense);
        println!("Net profit:      {}{}", currency, trip.net_profit);
        if trip.photo.is_some() {
            println!("Photo:           (attached)");
        }
    }

    Ok(())
}

pub fn output_trip_list(
    output_format: OutputFormat,
    trips: &[&Trip],
    total_matched: usize,
    currency: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&trips)?;
        println!("{}", content);
        return Ok(());
    }

    if trips.is_empty() {
        println!("No trips recorded.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<10}  {:<22}  {:>12}  {:>12}  {:>12}",
        "Id", "Date", "Truck", "Income", "Expense", "Profit"
    );
    for trip in trips {
        println!(
            "{:<36}  {:<10}  {:<22}  {:>12}  {:>12}  {:>12}",
            trip.id,
            trip.date.format("%Y-%m-%d").to_string(),
            trip.truck_number,
            format!("{}{}", currency, trip.income),
            format!("{}{}", currency, trip.total_expense),
            format!("{}{}", currency, trip.net_profit),
        );
    }

    if trips.len() < total_matched {
        println!("\nShowing {} of {} trip(s)", trips.len(), total_matched);
    } else {
        println!("\n{} trip(s)", trips.len());
    }

    Ok(())
}

pub fn output_stats(
    output_format: OutputFormat,
    stats: &BusinessStats,
    currency: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(stats)?;
        println!("{}", content);
    } else {
        println!("\nBusiness Totals");
        println!("===============");
        println!("Trips:          {}", stats.trip_count);
        println!("Total income:   {}{}", currency, stats.total_income);
        println!("Total expense:  {}{}", currency, stats.total_expense);
        println!("Net profit:     {}{}", currency, stats.total_profit);
    }

    Ok(())
}

pub fn output_truck_stats(
    output_format: OutputFormat,
    rollup: &[TruckStats],
    currency: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&rollup)?;
        println!("{}", content);
        return Ok(());
    }

    if rollup.is_empty() {
        println!("No trips recorded.");
        return Ok(());
    }

    println!(
        "{:<22}  {:>6}  {:>12}  {:>14}  {:>12}  {:>8}",
        "Truck", "Trips", "Income", "Avg profit", "Profit", "Margin"
    );
    for truck in rollup {
        println!(
            "{:<22}  {:>6}  {:>12}  {:>14}  {:>12}  {:>7.1}%",
            truck.truck_number,
            truck.trip_count,
            format!("{}{}", currency, truck.income),
            format!("{}{:.0}", currency, truck.avg_profit()),
            format!("{}{}", currency, truck.profit),
            truck.margin_pct(),
        );
    }

    Ok(())
}
