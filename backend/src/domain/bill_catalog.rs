//! Bill catalog domain logic.
//!
//! Read-only accessor over the bills supplied by the external bill
//! data source. No caching: every call goes back to the source, which
//! stays the single source of truth.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::models::bill::Bill;
use crate::storage::csv::{BillRepository, CsvConnection};
use crate::storage::traits::BillStorage;

/// Service exposing the bill catalog to the rest of the domain.
#[derive(Clone)]
pub struct BillCatalog {
    bill_repository: BillRepository,
}

impl BillCatalog {
    /// Create a new BillCatalog over the given connection.
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            bill_repository: BillRepository::new(connection),
        }
    }

    /// List every bill in the catalog, in source order.
    pub fn list_bills(&self) -> Result<Vec<Bill>, DomainError> {
        let bills = self
            .bill_repository
            .list_bills()
            .map_err(DomainError::unavailable)?;
        info!("Catalog listed {} bills", bills.len());
        Ok(bills)
    }

    /// Get a single bill by ID, failing with `NotFound` when absent.
    pub fn get_bill(&self, bill_id: &str) -> Result<Bill, DomainError> {
        let bill = self
            .bill_repository
            .get_bill(bill_id)
            .map_err(DomainError::unavailable)?;
        match bill {
            Some(bill) => Ok(bill),
            None => {
                warn!("Bill not found: {}", bill_id);
                Err(DomainError::NotFound(format!("bill {}", bill_id)))
            }
        }
    }

    /// Direct repository access for fixtures and wiring.
    pub fn repository(&self) -> &BillRepository {
        &self.bill_repository
    }
}
