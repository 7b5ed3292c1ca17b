//! # Bill Payment Backend
//!
//! Core of the utility-bill payment system: a read-only bill catalog,
//! a payment-eligibility rule, an identity-scoped payment record
//! store, catalog search, and a payment report generator. The HTTP
//! surface in [`rest`] is a thin mapping onto these services.

use anyhow::Result;
use std::sync::Arc;

pub mod domain;
pub mod rest;
pub mod storage;

pub use storage::csv::CsvConnection;

/// Main backend struct that wires all services over one connection.
pub struct Backend {
    pub bill_catalog: domain::BillCatalog,
    pub payment_service: domain::PaymentService,
    pub report_service: domain::ReportService,
}

impl Backend {
    /// Create a new backend instance over the given data directory
    /// connection.
    pub fn new(connection: Arc<CsvConnection>) -> Result<Self> {
        let bill_catalog = domain::BillCatalog::new(connection.clone());
        let payment_service = domain::PaymentService::new(connection, bill_catalog.clone());
        let report_service = domain::ReportService::new();

        Ok(Backend {
            bill_catalog,
            payment_service,
            report_service,
        })
    }
}
