//! Domain model for a utility bill.
//!
//! Bills are owned by the external bill data source; the core only
//! reads them. The catalog repository is the one place they enter the
//! system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a utility bill.
///
/// The set is open-ended: unknown category names coming from the data
/// source are preserved as `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BillCategory {
    Electricity,
    Gas,
    Water,
    Internet,
    Other(String),
}

impl BillCategory {
    /// Canonical string form used in CSV storage and JSON payloads.
    pub fn as_str(&self) -> &str {
        match self {
            BillCategory::Electricity => "Electricity",
            BillCategory::Gas => "Gas",
            BillCategory::Water => "Water",
            BillCategory::Internet => "Internet",
            BillCategory::Other(name) => name,
        }
    }
}

impl From<String> for BillCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Electricity" => BillCategory::Electricity,
            "Gas" => BillCategory::Gas,
            "Water" => BillCategory::Water,
            "Internet" => BillCategory::Internet,
            _ => BillCategory::Other(s),
        }
    }
}

impl From<BillCategory> for String {
    fn from(category: BillCategory) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for BillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single utility charge for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub category: BillCategory,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Billed amount, always >= 0
    pub amount: f64,
    /// Billing period this bill belongs to (calendar month/year)
    pub date: NaiveDate,
    pub image: Option<String>,
}
