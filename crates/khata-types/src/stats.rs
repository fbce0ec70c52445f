//! Aggregation over the trip list: overall totals and per-truck rollups

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::trip::Trip;

/// Overall business totals, recomputed from the trip list on demand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_profit: f64,
    pub trip_count: usize,
}

impl BusinessStats {
    /// Fold the full trip list; an empty list yields all zeros.
    pub fn from_trips(trips: &[Trip]) -> Self {
        trips.iter().fold(Self::default(), |mut acc, trip| {
            acc.total_income += trip.income;
            acc.total_expense += trip.total_expense;
            acc.total_profit += trip.net_profit;
            acc.trip_count += 1;
            acc
        })
    }
}

/// Per-truck rollup, keyed by exact truck number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckStats {
    pub truck_number: String,
    pub income: f64,
    pub profit: f64,
    pub trip_count: usize,
}

impl TruckStats {
    /// Average profit per trip
    pub fn avg_profit(&self) -> f64 {
        if self.trip_count == 0 {
            0.0
        } else {
            self.profit / self.trip_count as f64
        }
    }

    /// Profit as a percentage of income; zero-income groups report 0.0
    pub fn margin_pct(&self) -> f64 {
        if self.income == 0.0 {
            0.0
        } else {
            (self.profit / self.income) * 100.0
        }
    }
}

/// Group trips by truck number (exact, case-sensitive match) and sum income,
/// profit, and count per group. Output is ordered by descending total profit.
pub fn truck_rollup(trips: &[Trip]) -> Vec<TruckStats> {
    let mut groups: HashMap<&str, TruckStats> = HashMap::new();

    for trip in trips {
        let entry = groups
            .entry(trip.truck_number.as_str())
            .or_insert_with(|| TruckStats {
                truck_number: trip.truck_number.clone(),
                income: 0.0,
                profit: 0.0,
                trip_count: 0,
            });
        entry.income += trip.income;
        entry.profit += trip.net_profit;
        entry.trip_count += 1;
    }

    let mut rollup: Vec<TruckStats> = groups.into_values().collect();
    rollup.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    rollup
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(truck: &str, income: f64, total_expense: f64) -> Trip {
        Trip {
            id: format!("t-{}-{}", truck, income),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            truck_number: truck.to_string(),
            income,
            driver_allowance: total_expense,
            fuel_cost: 0.0,
            other_expenses: 0.0,
            description: String::new(),
            total_expense,
            net_profit: income - total_expense,
            photo: None,
        }
    }

    #[test]
    fn test_stats_empty_list_is_all_zero() {
        let stats = BusinessStats::from_trips(&[]);
        assert_eq!(stats, BusinessStats::default());
        assert_eq!(stats.trip_count, 0);
    }

    #[test]
    fn test_stats_totals() {
        let trips = vec![trip("A", 1000.0, 400.0), trip("A", 500.0, 500.0)];
        let stats = BusinessStats::from_trips(&trips);
        assert_eq!(stats.total_income, 1500.0);
        assert_eq!(stats.total_expense, 900.0);
        assert_eq!(stats.total_profit, 600.0);
        assert_eq!(stats.trip_count, 2);
    }

    #[test]
    fn test_rollup_orders_by_descending_profit() {
        let trips = vec![
            trip("A", 1000.0, 400.0), // profit 600
            trip("A", 500.0, 500.0),  // profit 0
            trip("B", 1200.0, 200.0), // profit 1000
        ];
        let rollup = truck_rollup(&trips);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].truck_number, "B");
        assert_eq!(rollup[0].profit, 1000.0);
        assert_eq!(rollup[0].trip_count, 1);
        assert_eq!(rollup[1].truck_number, "A");
        assert_eq!(rollup[1].profit, 600.0);
        assert_eq!(rollup[1].trip_count, 2);
        assert_eq!(rollup[1].income, 1500.0);
    }

    #[test]
    fn test_rollup_grouping_is_case_sensitive() {
        let trips = vec![trip("dhaka-11", 100.0, 0.0), trip("Dhaka-11", 100.0, 0.0)];
        assert_eq!(truck_rollup(&trips).len(), 2);
    }

    #[test]
    fn test_avg_profit() {
        let trips = vec![trip("A", 1000.0, 400.0), trip("A", 500.0, 500.0)];
        let rollup = truck_rollup(&trips);
        assert_eq!(rollup[0].avg_profit(), 300.0);
    }

    #[test]
    fn test_margin_of_zero_income_group_is_zero() {
        let stats = TruckStats {
            truck_number: "A".to_string(),
            income: 0.0,
            profit: -500.0,
            trip_count: 1,
        };
        assert_eq!(stats.margin_pct(), 0.0);
        assert!(stats.margin_pct().is_finite());
    }

    #[test]
    fn test_margin_pct() {
        let stats = TruckStats {
            truck_number: "A".to_string(),
            income: 2000.0,
            profit: 500.0,
            trip_count: 2,
        };
        assert_eq!(stats.margin_pct(), 25.0);
    }
}
