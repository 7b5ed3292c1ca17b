//! Domain model for a payment record.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A user's submission to pay one bill.
///
/// `amount` and `bill_title` are snapshots taken from the bill at
/// creation time and are never re-derived from the catalog. `id`,
/// `bill_id`, `user_id` and `paid_at` are immutable after creation;
/// everything else may change through an explicit update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub bill_id: String,
    pub bill_title: String,
    pub user_id: String,
    pub payer_name: String,
    pub email: Option<String>,
    pub address: String,
    pub phone: String,
    pub note: Option<String>,
    /// Snapshot of the bill amount at creation time
    pub amount: f64,
    /// Payment date shown to the user; editable
    pub date: NaiveDate,
    /// Creation timestamp; immutable
    pub paid_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Generate a unique payment record ID.
    /// Format: payment::<timestamp_ms>-<random_suffix>
    /// Example: payment::1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("payment::{}-{}", timestamp_ms, Self::generate_random_suffix(4))
    }

    /// Generate a random hex suffix for payment IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}
