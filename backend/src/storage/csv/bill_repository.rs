//! CSV implementation of the `BillStorage` trait.
//!
//! Stands in for the external bill data source: one `bills.csv` file
//! in the data directory, seeded with a starter catalog the first time
//! it is touched.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use csv::{Reader, Writer};
use log::info;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::domain::models::bill::{Bill, BillCategory};
use crate::storage::traits::BillStorage;

/// Starter catalog written when no `bills.csv` exists yet. Dated
/// relative to the install month so a fresh setup has both payable
/// and expired bills to browse.
static SEED_BILLS: Lazy<Vec<Bill>> = Lazy::new(|| {
    let today = Local::now().date_naive();
    vec![
        seed_bill(
            "bill-elec-001",
            BillCategory::Electricity,
            "Monthly electricity bill",
            "Household electricity usage for the current billing period",
            "Dhaka",
            1450.0,
            billing_period(today, 0),
        ),
        seed_bill(
            "bill-gas-001",
            BillCategory::Gas,
            "Cooking gas supply",
            "Piped natural gas for the kitchen line",
            "Chittagong",
            980.0,
            billing_period(today, 0),
        ),
        seed_bill(
            "bill-water-001",
            BillCategory::Water,
            "Water supply bill",
            "Municipal water supply and sewerage",
            "Dhaka",
            620.0,
            billing_period(today, 1),
        ),
        seed_bill(
            "bill-net-001",
            BillCategory::Internet,
            "Fiber internet subscription",
            "100 Mbps home fiber connection",
            "Sylhet",
            1200.0,
            billing_period(today, 1),
        ),
    ]
});

fn seed_bill(
    id: &str,
    category: BillCategory,
    title: &str,
    description: &str,
    location: &str,
    amount: f64,
    date: NaiveDate,
) -> Bill {
    Bill {
        id: id.to_string(),
        category,
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        amount,
        date,
        image: None,
    }
}

/// The 5th of the month `months_back` months before `today`.
fn billing_period(today: NaiveDate, months_back: u32) -> NaiveDate {
    let mut year = today.year();
    let mut month = today.month() as i32 - months_back as i32;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 5).expect("valid seed date")
}

/// CSV-backed bill catalog source.
#[derive(Clone)]
pub struct BillRepository {
    connection: Arc<CsvConnection>,
}

impl BillRepository {
    /// Create a new CSV bill repository.
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Read the full catalog, seeding the file if it does not exist.
    fn read_bills(&self) -> Result<Vec<Bill>> {
        self.ensure_catalog_exists()?;

        let file = File::open(self.connection.bills_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut bills = Vec::new();
        for result in csv_reader.deserialize() {
            let bill: Bill = result?;
            bills.push(bill);
        }
        Ok(bills)
    }

    /// Rewrite the whole catalog file.
    fn write_bills(&self, bills: &[Bill]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.bills_file_path())?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        for bill in bills {
            csv_writer.serialize(bill)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Create `bills.csv` with the starter catalog when missing.
    fn ensure_catalog_exists(&self) -> Result<()> {
        if self.connection.bills_file_path().exists() {
            return Ok(());
        }
        info!(
            "No bill catalog found, seeding {} starter bills",
            SEED_BILLS.len()
        );
        self.write_bills(&SEED_BILLS)
    }
}

impl BillStorage for BillRepository {
    fn list_bills(&self) -> Result<Vec<Bill>> {
        self.read_bills()
    }

    fn get_bill(&self, bill_id: &str) -> Result<Option<Bill>> {
        let bills = self.read_bills()?;
        Ok(bills.into_iter().find(|bill| bill.id == bill_id))
    }

    fn store_bill(&self, bill: &Bill) -> Result<()> {
        let mut bills = self.read_bills()?;
        match bills.iter_mut().find(|existing| existing.id == bill.id) {
            Some(existing) => *existing = bill.clone(),
            None => bills.push(bill.clone()),
        }
        self.write_bills(&bills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repository() -> (BillRepository, tempfile::TempDir) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (BillRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_seeds_catalog_on_first_read() {
        let (repository, _temp_dir) = create_test_repository();
        let bills = repository.list_bills().unwrap();
        assert_eq!(bills.len(), SEED_BILLS.len());
        assert!(bills.iter().any(|b| b.category == BillCategory::Electricity));
    }

    #[test]
    fn test_store_and_get_round_trip() {
        let (repository, _temp_dir) = create_test_repository();
        let bill = seed_bill(
            "bill-test-1",
            BillCategory::Other("Sewage".to_string()),
            "Sewage charge",
            "Quarterly sewage maintenance",
            "Khulna",
            310.0,
            NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
        );
        repository.store_bill(&bill).unwrap();

        let loaded = repository.get_bill("bill-test-1").unwrap().unwrap();
        assert_eq!(loaded, bill);
    }

    #[test]
    fn test_get_missing_bill_returns_none() {
        let (repository, _temp_dir) = create_test_repository();
        assert!(repository.get_bill("no-such-bill").unwrap().is_none());
    }

    #[test]
    fn test_store_replaces_existing_bill() {
        let (repository, _temp_dir) = create_test_repository();
        let mut bill = repository.list_bills().unwrap().remove(0);
        bill.amount = 9999.0;
        repository.store_bill(&bill).unwrap();

        let loaded = repository.get_bill(&bill.id).unwrap().unwrap();
        assert_eq!(loaded.amount, 9999.0);
        // No duplicate row was appended
        let count = repository
            .list_bills()
            .unwrap()
            .iter()
            .filter(|b| b.id == bill.id)
            .count();
        assert_eq!(count, 1);
    }
}
