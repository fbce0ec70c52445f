//! CSV report export
//!
//! Column order and header text match the reports the old TruckKhata app
//! produced, so spreadsheets built on those keep working. Fields go through
//! a real CSV writer, which quotes embedded commas and quotes.

use chrono::NaiveDate;
use khata_types::{Error, Result, Trip};
use std::path::Path;

/// Fixed report header: date, truck no, income, allowance, fuel, other,
/// total expense, net profit
pub const CSV_HEADERS: [&str; 8] = [
    "তারিখ",
    "গাড়ি নং",
    "আয়",
    "খোরাকি",
    "তেল খরচ",
    "অন্যান্য",
    "মোট ব্যয়",
    "নিট লাভ",
];

/// Default report file name for a given day
pub fn default_report_filename(date: NaiveDate) -> String {
    format!("truck_report_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the full trip list as a UTF-8 CSV report, one row per trip in
/// current list order. Photos are not exported.
pub fn export_trips_csv(trips: &[Trip], output_path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(output_path).map_err(|e| Error::Export(e.to_string()))?;

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| Error::Export(e.to_string()))?;

    for trip in trips {
        writer
            .write_record(&[
                trip.date.format("%Y-%m-%d").to_string(),
                trip.truck_number.clone(),
                trip.income.to_string(),
                trip.driver_allowance.to_string(),
                trip.fuel_cost.to_string(),
                trip.other_expenses.to_string(),
                trip.total_expense.to_string(),
                trip.net_profit.to_string(),
            ])
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
