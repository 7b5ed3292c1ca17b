//! # CSV Storage Module
//!
//! File-based storage for the bill-payment core:
//!
//! - `bills.csv` — the bill catalog, standing in for the external
//!   bill data source, seeded on first use
//! - `{user_id}_payments.csv` — one payment record file per identity
//!
//! All writes rewrite the target file whole, so a partial append can
//! never leave a half-written row behind.

pub mod bill_repository;
pub mod connection;
pub mod payment_repository;

pub use bill_repository::BillRepository;
pub use connection::CsvConnection;
pub use payment_repository::PaymentRepository;
