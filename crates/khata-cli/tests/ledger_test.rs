//! End-to-end ledger tests: record, aggregate, export

use chrono::NaiveDate;
use tempfile::tempdir;

use khata_app::export::export_trips_csv;
use khata_store::TripStore;
use khata_types::TripDraft;

fn draft(date: (i32, u32, u32), truck: &str, income: f64, fuel: f64) -> TripDraft {
    TripDraft {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        truck_number: truck.to_string(),
        income,
        driver_allowance: 1000.0,
        fuel_cost: fuel,
        other_expenses: 500.0,
        description: "ঢাকা টু চট্টগ্রাম - মাল লোড".to_string(),
        photo: None,
    }
}

/// Record a handful of trips, then check totals, rollup, and the CSV report
/// against hand-computed values
#[test]
fn test_ledger_end_to_end() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let mut store =
        TripStore::open(temp_dir.path().to_path_buf()).expect("Failed to open store");

    // Initially empty: all-zero stats
    let stats = store.stats();
    assert_eq!(stats.trip_count, 0);
    assert_eq!(stats.total_income, 0.0);
    assert_eq!(stats.total_profit, 0.0);

    store
        .add(draft((2024, 6, 10), "ঢাকা মেট্রো-ট ১১-২২৩৩", 15000.0, 5000.0))
        .expect("Failed to add trip");
    store
        .add(draft((2024, 6, 12), "ঢাকা মেট্রো-ট ১১-২২৩৩", 9000.0, 4000.0))
        .expect("Failed to add trip");
    let chattogram_trip = store
        .add(draft((2024, 6, 14), "চট্ট মেট্রো-ট ৪৪-৫৫৬৬", 20000.0, 6000.0))
        .expect("Failed to add trip");

    // per-trip expense = allowance 1000 + fuel + other 500
    let stats = store.stats();
    assert_eq!(stats.trip_count, 3);
    assert_eq!(stats.total_income, 44000.0);
    assert_eq!(stats.total_expense, 19500.0);
    assert_eq!(stats.total_profit, 24500.0);

    // rollup: Chattogram truck (profit 12500) ahead of the Dhaka truck (12000)
    let rollup = store.truck_stats();
    assert_eq!(rollup.len(), 2);
    assert_eq!(rollup[0].truck_number, "চট্ট মেট্রো-ট ৪৪-৫৫৬৬");
    assert_eq!(rollup[0].profit, 12500.0);
    assert_eq!(rollup[1].truck_number, "ঢাকা মেট্রো-ট ১১-২২৩৩");
    assert_eq!(rollup[1].profit, 12000.0);
    assert_eq!(rollup[1].trip_count, 2);

    // reload from disk reproduces the same ledger
    let reloaded = TripStore::open(temp_dir.path().to_path_buf()).expect("Failed to reopen");
    assert_eq!(reloaded.all(), store.all());
    assert_eq!(reloaded.stats(), stats);

    // CSV report: header + one row per trip, newest first
    let report_path = temp_dir.path().join("truck_report_2024-06-15.csv");
    export_trips_csv(store.all(), &report_path).expect("Failed to export");

    let content = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2024-06-14"));
    assert!(lines[1].contains("20000"));
    assert!(lines[3].starts_with("2024-06-10"));

    // delete the newest record and confirm exactly one row disappears
    assert!(store.delete(&chattogram_trip.id).expect("Failed to delete"));
    assert_eq!(store.count(), 2);
    assert!(!store.delete(&chattogram_trip.id).expect("Delete should be a no-op"));
    assert_eq!(store.count(), 2);
}

/// Rejected drafts must leave both memory and disk untouched
#[test]
fn test_rejected_add_changes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let mut store =
        TripStore::open(temp_dir.path().to_path_buf()).expect("Failed to open store");

    store
        .add(draft((2024, 6, 10), "ঢাকা মেট্রো-ট ১১-২২৩৩", 15000.0, 5000.0))
        .expect("Failed to add trip");

    assert!(store.add(draft((2024, 6, 11), "", 15000.0, 5000.0)).is_err());
    assert!(store
        .add(draft((2024, 6, 11), "ঢাকা মেট্রো-ট ১১-২২৩৩", -1.0, 5000.0))
        .is_err());

    let reloaded = TripStore::open(temp_dir.path().to_path_buf()).expect("Failed to reopen");
    assert_eq!(reloaded.count(), 1);
}
