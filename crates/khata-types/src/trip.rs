//! Trip record model and derived-field computation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One recorded trip: income, expense breakdown, and the derived totals.
///
/// Field names serialize in camelCase so ledgers exported from the old
/// TruckKhata app load unchanged. Records are immutable once created; the
/// only mutation the ledger supports is whole-record deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique opaque identifier, assigned at creation
    pub id: String,
    /// Trip date
    pub date: NaiveDate,
    /// Truck registration number (free text, e.g. "ঢাকা মেট্রো-ট ১১-২২৩৩")
    pub truck_number: String,
    /// Fare received for the trip
    pub income: f64,
    /// Driver meal/day allowance
    pub driver_allowance: f64,
    /// Fuel cost
    pub fuel_cost: f64,
    /// Any other expenses
    pub other_expenses: f64,
    /// Free-text description (route, cargo)
    pub description: String,
    /// Sum of the three expense components, fixed at creation
    pub total_expense: f64,
    /// income - total_expense, may be negative
    pub net_profit: f64,
    /// Optional photo as a base64 data string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Trip {
    /// Validate a draft, compute the derived fields, and assign a fresh id.
    pub fn from_draft(draft: TripDraft) -> Result<Self> {
        draft.validate()?;

        let total_expense = draft.driver_allowance + draft.fuel_cost + draft.other_expenses;
        let net_profit = draft.income - total_expense;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: draft.date,
            truck_number: draft.truck_number,
            income: draft.income,
            driver_allowance: draft.driver_allowance,
            fuel_cost: draft.fuel_cost,
            other_expenses: draft.other_expenses,
            description: draft.description,
            total_expense,
            net_profit,
            photo: draft.photo,
        })
    }

    /// Case-insensitive match against truck number or description
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.truck_number.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
    }
}

/// User-supplied trip fields, before validation and id assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDraft {
    pub date: NaiveDate,
    pub truck_number: String,
    pub income: f64,
    pub driver_allowance: f64,
    pub fuel_cost: f64,
    pub other_expenses: f64,
    pub description: String,
    pub photo: Option<String>,
}

impl TripDraft {
    /// The two required-field rules: non-empty truck number, positive income
    pub fn validate(&self) -> Result<()> {
        if self.truck_number.trim().is_empty() {
            return Err(Error::Validation("truck number must not be empty".into()));
        }
        if self.income <= 0.0 {
            return Err(Error::Validation("income must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TripDraft {
        TripDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            truck_number: "ঢাকা মেট্রো-ট ১১-২২৩৩".to_string(),
            income: 15000.0,
            driver_allowance: 1200.0,
            fuel_cost: 5500.0,
            other_expenses: 800.0,
            description: "ঢাকা টু চট্টগ্রাম".to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_derived_fields() {
        let trip = Trip::from_draft(draft()).unwrap();
        assert_eq!(trip.total_expense, 1200.0 + 5500.0 + 800.0);
        assert_eq!(trip.net_profit, 15000.0 - 7500.0);
    }

    #[test]
    fn test_net_profit_can_be_negative() {
        let mut d = draft();
        d.income = 5000.0;
        let trip = Trip::from_draft(d).unwrap();
        assert_eq!(trip.net_profit, -2500.0);
    }

    #[test]
    fn test_empty_truck_number_rejected() {
        let mut d = draft();
        d.truck_number = "   ".to_string();
        assert!(Trip::from_draft(d).is_err());
    }

    #[test]
    fn test_non_positive_income_rejected() {
        let mut d = draft();
        d.income = 0.0;
        assert!(Trip::from_draft(d).is_err());

        let mut d = draft();
        d.income = -100.0;
        assert!(Trip::from_draft(d).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Trip::from_draft(draft()).unwrap();
        let b = Trip::from_draft(draft()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let mut d = draft();
        d.truck_number = "Dhaka Metro-TA 11-2233".to_string();
        let trip = Trip::from_draft(d).unwrap();
        assert!(trip.matches("dhaka"));
        assert!(trip.matches("চট্টগ্রাম"));
        assert!(!trip.matches("sylhet"));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let trip = Trip::from_draft(draft()).unwrap();
        let json = serde_json::to_string(&trip).unwrap();
        assert!(json.contains("\"truckNumber\""));
        assert!(json.contains("\"netProfit\""));
        assert!(json.contains("\"totalExpense\""));
        // absent photo is omitted entirely
        assert!(!json.contains("\"photo\""));
    }
}
