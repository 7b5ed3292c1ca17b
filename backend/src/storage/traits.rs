//! # Storage Traits
//!
//! Storage abstraction traits for the bill-payment core. The domain
//! layer works against these interfaces so a different backend (a SQL
//! database, a remote API client) could replace the CSV files without
//! touching the services.

use anyhow::Result;

use crate::domain::models::bill::Bill;
use crate::domain::models::payment::PaymentRecord;

/// Interface to the external bill data source.
///
/// The core treats bills as read-only; `store_bill` exists so the
/// repository can seed a catalog and so tests can arrange fixtures,
/// not for domain code to mutate bills.
pub trait BillStorage: Send + Sync {
    /// List every bill in the catalog, in stored order.
    fn list_bills(&self) -> Result<Vec<Bill>>;

    /// Retrieve a specific bill by ID.
    fn get_bill(&self, bill_id: &str) -> Result<Option<Bill>>;

    /// Insert or replace a bill in the source.
    fn store_bill(&self, bill: &Bill) -> Result<()>;
}

/// Interface for payment record storage operations.
///
/// Every operation is scoped by `user_id`; an implementation must
/// never return or touch another user's records.
pub trait PaymentStorage: Send + Sync {
    /// Store a new payment record.
    fn store_payment(&self, record: &PaymentRecord) -> Result<()>;

    /// Retrieve one of the user's payment records by ID.
    fn get_payment(&self, user_id: &str, payment_id: &str) -> Result<Option<PaymentRecord>>;

    /// List all payment records belonging to the user, in stored order.
    fn list_payments(&self, user_id: &str) -> Result<Vec<PaymentRecord>>;

    /// Replace an existing payment record (matched by ID).
    fn update_payment(&self, record: &PaymentRecord) -> Result<()>;

    /// Delete one of the user's payment records.
    /// Returns true if the record was found and deleted.
    fn delete_payment(&self, user_id: &str, payment_id: &str) -> Result<bool>;
}
