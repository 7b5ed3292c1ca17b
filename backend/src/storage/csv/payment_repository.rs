//! CSV implementation of the `PaymentStorage` trait.
//!
//! One `{user_id}_payments.csv` file per identity, rewritten whole on
//! every mutation. Scoping by file means a query can never surface
//! another user's records.

use anyhow::Result;
use csv::{Reader, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::domain::models::payment::PaymentRecord;
use crate::storage::traits::PaymentStorage;

/// CSV-based payment record repository.
#[derive(Clone)]
pub struct PaymentRepository {
    connection: Arc<CsvConnection>,
}

impl PaymentRepository {
    /// Create a new CSV payment repository.
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Read all payment records for a user from their CSV file.
    fn read_payments(&self, user_id: &str) -> Result<Vec<PaymentRecord>> {
        let file_path = self.connection.payments_file_path(user_id);
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: PaymentRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// Write all payment records for a user to their CSV file.
    fn write_payments(&self, user_id: &str, records: &[PaymentRecord]) -> Result<()> {
        let file_path = self.connection.payments_file_path(user_id);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl PaymentStorage for PaymentRepository {
    fn store_payment(&self, record: &PaymentRecord) -> Result<()> {
        let mut records = self.read_payments(&record.user_id)?;
        records.push(record.clone());
        self.write_payments(&record.user_id, &records)?;
        info!("Stored payment record {} for user {}", record.id, record.user_id);
        Ok(())
    }

    fn get_payment(&self, user_id: &str, payment_id: &str) -> Result<Option<PaymentRecord>> {
        let records = self.read_payments(user_id)?;
        Ok(records.into_iter().find(|record| record.id == payment_id))
    }

    fn list_payments(&self, user_id: &str) -> Result<Vec<PaymentRecord>> {
        self.read_payments(user_id)
    }

    fn update_payment(&self, record: &PaymentRecord) -> Result<()> {
        let mut records = self.read_payments(&record.user_id)?;
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => anyhow::bail!("payment record {} not found for update", record.id),
        }
        self.write_payments(&record.user_id, &records)
    }

    fn delete_payment(&self, user_id: &str, payment_id: &str) -> Result<bool> {
        let mut records = self.read_payments(user_id)?;
        let before = records.len();
        records.retain(|record| record.id != payment_id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_payments(user_id, &records)?;
        info!("Deleted payment record {} for user {}", payment_id, user_id);
        Ok(true)
    }
}
