//! Persistent trip ledger
//!
//! The full trip list is held in memory as the single source of truth and
//! rewritten to `trips.json` on every mutation. A missing or unreadable
//! file loads as an empty ledger.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use khata_types::{truck_rollup, BusinessStats, Result, Trip, TripDraft, TruckStats};

const LEDGER_VERSION: u32 = 1;

/// On-disk payload. Ledgers written by the old TruckKhata app are a bare
/// trip array; current files carry a version tag for future migrations.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Versioned {
        #[allow(dead_code)]
        version: u32,
        trips: Vec<Trip>,
    },
    Bare(Vec<Trip>),
}

impl StoredLedger {
    fn into_trips(self) -> Vec<Trip> {
        match self {
            StoredLedger::Versioned { trips, .. } => trips,
            StoredLedger::Bare(trips) => trips,
        }
    }
}

#[derive(Serialize)]
struct LedgerEnvelope<'a> {
    version: u32,
    trips: &'a [Trip],
}

/// Persistent store for trip records, newest first
pub struct TripStore {
    store_path: PathBuf,
    trips: Vec<Trip>,
}

impl TripStore {
    /// Create or load a trip store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("trips.json");

        let trips = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .map(StoredLedger::into_trips)
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self { store_path, trips })
    }

    /// Save the full ledger to disk
    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(
            writer,
            &LedgerEnvelope {
                version: LEDGER_VERSION,
                trips: &self.trips,
            },
        )?;
        Ok(())
    }

    /// Validate the draft, prepend the new record, and persist.
    /// On validation failure the ledger is unchanged.
    pub fn add(&mut self, draft: TripDraft) -> Result<Trip> {
        let trip = Trip::from_draft(draft)?;
        self.trips.insert(0, trip.clone());
        self.save()?;
        Ok(trip)
    }

    /// Remove the record with the given id. No-op (returns false) if absent.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.trips.len();
        self.trips.retain(|t| t.id != id);
        let removed = self.trips.len() < before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// All trips, newest first
    pub fn all(&self) -> &[Trip] {
        &self.trips
    }

    /// The most recent `n` trips
    pub fn recent(&self, n: usize) -> &[Trip] {
        &self.trips[..self.trips.len().min(n)]
    }

    /// Case-insensitive substring search over truck number and description
    pub fn search(&self, query: &str) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.matches(query)).collect()
    }

    /// Get a trip by id
    pub fn get(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    /// Total trip count
    pub fn count(&self) -> usize {
        self.trips.len()
    }

    /// Overall business totals
    pub fn stats(&self) -> BusinessStats {
        BusinessStats::from_trips(&self.trips)
    }

    /// Per-truck rollup, descending by total profit
    pub fn truck_stats(&self) -> Vec<TruckStats> {
        truck_rollup(&self.trips)
    }

    /// Path of the ledger file
    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn draft(truck: &str, income: f64) -> TripDraft {
        TripDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            truck_number: truck.to_string(),
            income,
            driver_allowance: 500.0,
            fuel_cost: 2000.0,
            other_expenses: 300.0,
            description: "টেস্ট ট্রিপ".to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_open_empty() {
        let dir = tempdir().unwrap();
        let store = TripStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let dir = tempdir().unwrap();
        let mut store = TripStore::open(dir.path().to_path_buf()).unwrap();

        let first = store.add(draft("১১-২২৩৩", 10000.0)).unwrap();
        let second = store.add(draft("৪৪-৫৫৬৬", 12000.0)).unwrap();

        // newest first
        assert_eq!(store.all()[0].id, second.id);
        assert_eq!(store.all()[1].id, first.id);

        // reload reproduces the identical list
        let reloaded = TripStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.all(), store.all());
    }

    #[test]
    fn test_invalid_draft_leaves_ledger_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = TripStore::open(dir.path().to_path_buf()).unwrap();
        store.add(draft("১১-২২৩৩", 10000.0)).unwrap();

        assert!(store.add(draft("", 10000.0)).is_err());
        assert!(store.add(draft("১১-২২৩৩", 0.0)).is_err());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_delete_existing_removes_exactly_one() {
        let dir = tempdir().unwrap();
        let mut store = TripStore::open(dir.path().to_path_buf()).unwrap();
        let trip = store.add(draft("১১-২২৩৩", 10000.0)).unwrap();
        store.add(draft("৪৪-৫৫৬৬", 12000.0)).unwrap();

        assert!(store.delete(&trip.id).unwrap());
        assert_eq!(store.count(), 1);
        assert!(store.get(&trip.id).is_none());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = TripStore::open(dir.path().to_path_buf()).unwrap();
        store.add(draft("১১-২২৩৩", 10000.0)).unwrap();

        assert!(!store.delete("no-such-id").unwrap());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("trips.json"), "{not json").unwrap();

        let store = TripStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_bare_array_ledger_still_loads() {
        let dir = tempdir().unwrap();
        // shape written by the old app: a plain array of camelCase trips
        let legacy = r#"[{
            "id": "1718000000000",
            "date": "2024-06-10",
            "truckNumber": "ঢাকা মেট্রো-ট ১১-২২৩৩",
            "income": 15000.0,
            "driverAllowance": 1200.0,
            "fuelCost": 5500.0,
            "otherExpenses": 800.0,
            "description": "ঢাকা টু চট্টগ্রাম",
            "totalExpense": 7500.0,
            "netProfit": 7500.0
        }]"#;
        std::fs::write(dir.path().join("trips.json"), legacy).unwrap();

        let store = TripStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.count(), 1);
        assert_eq!(store.all()[0].id, "1718000000000");
        assert_eq!(store.all()[0].net_profit, 7500.0);
    }

    #[test]
    fn test_saved_ledger_carries_version_tag() {
        let dir = tempdir().unwrap();
        let mut store = TripStore::open(dir.path().to_path_buf()).unwrap();
        store.add(draft("১১-২২৩৩", 10000.0)).unwrap();

        let raw = std::fs::read_to_string(store.store_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["trips"].is_array());
    }

    #[test]
    fn test_search_and_recent() {
        let dir = tempdir().unwrap();
        let mut store = TripStore::open(dir.path().to_path_buf()).unwrap();
        store.add(draft("Dhaka Metro 11", 10000.0)).unwrap();
        store.add(draft("Chattogram 22", 9000.0)).unwrap();
        store.add(draft("Dhaka Metro 33", 8000.0)).unwrap();

        assert_eq!(store.search("dhaka").len(), 2);
        assert_eq!(store.search("টেস্ট").len(), 3);
        assert_eq!(store.recent(2).len(), 2);
        assert_eq!(store.recent(10).len(), 3);
    }
}
