//! Payment record service: identity-scoped CRUD over payment records.
//!
//! Every operation takes the caller's identity explicitly; nothing is
//! read from ambient session state. Creation is gated by the payment
//! eligibility rule and snapshots the bill amount, which is never
//! re-derived from the catalog afterwards.
//!
//! Mutations are not internally serialized: two concurrent updates to
//! the same record are last-write-wins, with no version token.

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::bill_catalog::BillCatalog;
use crate::domain::commands::payments::{CreatePaymentCommand, UpdatePaymentCommand};
use crate::domain::eligibility::is_payable;
use crate::domain::errors::DomainError;
use crate::domain::models::identity::Identity;
use crate::domain::models::payment::PaymentRecord;
use crate::storage::csv::{CsvConnection, PaymentRepository};
use crate::storage::traits::PaymentStorage;

pub struct PaymentService {
    payment_repository: PaymentRepository,
    catalog: BillCatalog,
}

impl PaymentService {
    pub fn new(connection: Arc<CsvConnection>, catalog: BillCatalog) -> Self {
        Self {
            payment_repository: PaymentRepository::new(connection),
            catalog,
        }
    }

    /// Pay a bill now, using the local calendar date and wall clock.
    pub fn create_payment(
        &self,
        identity: Option<&Identity>,
        command: CreatePaymentCommand,
    ) -> Result<PaymentRecord, DomainError> {
        self.create_payment_at(identity, command, Local::now().date_naive(), Utc::now())
    }

    /// Pay a bill with the clock supplied by the caller.
    ///
    /// Precondition order: identity present, bill exists, bill payable
    /// this month, payload fields valid. An absent identity fails
    /// before any payload inspection.
    pub fn create_payment_at(
        &self,
        identity: Option<&Identity>,
        command: CreatePaymentCommand,
        today: NaiveDate,
        paid_at: DateTime<Utc>,
    ) -> Result<PaymentRecord, DomainError> {
        let identity = require_identity(identity)?;

        let bill = self.catalog.get_bill(&command.bill_id)?;

        if !is_payable(&bill, today) {
            warn!(
                "Rejected payment for bill {}: billed {} but today is {}",
                bill.id, bill.date, today
            );
            return Err(DomainError::NotEligible(bill.id));
        }

        validate_required("name", &command.payer_name)?;
        validate_required("address", &command.address)?;
        validate_required("phone", &command.phone)?;

        let record = PaymentRecord {
            id: PaymentRecord::generate_id(paid_at.timestamp_millis() as u64),
            bill_id: bill.id.clone(),
            bill_title: bill.title.clone(),
            user_id: identity.user_id.clone(),
            payer_name: command.payer_name.trim().to_string(),
            email: identity.email.clone(),
            address: command.address.trim().to_string(),
            phone: command.phone.trim().to_string(),
            note: command.note.filter(|n| !n.trim().is_empty()),
            // Snapshot of the bill amount, frozen from here on
            amount: bill.amount,
            date: today,
            paid_at,
        };

        self.payment_repository
            .store_payment(&record)
            .map_err(DomainError::unavailable)?;

        info!(
            "Created payment {} for bill {} by user {}",
            record.id, record.bill_id, record.user_id
        );
        Ok(record)
    }

    /// List the caller's payment records, in stored order. An empty
    /// history is an empty list, not an error.
    pub fn list_payments(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        let identity = require_identity(identity)?;
        let records = self
            .payment_repository
            .list_payments(&identity.user_id)
            .map_err(DomainError::unavailable)?;
        info!("Listed {} payments for user {}", records.len(), identity.user_id);
        Ok(records)
    }

    /// Apply a partial update to one of the caller's records.
    ///
    /// A record that does not exist and a record owned by someone else
    /// fail identically with `NotFound`.
    pub fn update_payment(
        &self,
        identity: Option<&Identity>,
        payment_id: &str,
        patch: UpdatePaymentCommand,
    ) -> Result<PaymentRecord, DomainError> {
        let identity = require_identity(identity)?;

        let mut record = self
            .payment_repository
            .get_payment(&identity.user_id, payment_id)
            .map_err(DomainError::unavailable)?
            .ok_or_else(|| DomainError::NotFound(format!("payment {}", payment_id)))?;

        if let Some(amount) = patch.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(DomainError::Validation(
                    "amount must be a non-negative number".to_string(),
                ));
            }
            record.amount = amount;
        }
        if let Some(address) = patch.address {
            validate_required("address", &address)?;
            record.address = address.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            validate_required("phone", &phone)?;
            record.phone = phone.trim().to_string();
        }
        if let Some(date) = patch.date {
            record.date = date;
        }

        self.payment_repository
            .update_payment(&record)
            .map_err(DomainError::unavailable)?;

        info!("Updated payment {} for user {}", record.id, identity.user_id);
        Ok(record)
    }

    /// Permanently delete one of the caller's records. No soft delete,
    /// no undo.
    pub fn delete_payment(
        &self,
        identity: Option<&Identity>,
        payment_id: &str,
    ) -> Result<(), DomainError> {
        let identity = require_identity(identity)?;

        let deleted = self
            .payment_repository
            .delete_payment(&identity.user_id, payment_id)
            .map_err(DomainError::unavailable)?;

        if !deleted {
            warn!(
                "Delete of payment {} for user {} found nothing",
                payment_id, identity.user_id
            );
            return Err(DomainError::NotFound(format!("payment {}", payment_id)));
        }
        Ok(())
    }
}

fn require_identity<'a>(identity: Option<&'a Identity>) -> Result<&'a Identity, DomainError> {
    match identity {
        Some(identity) if identity.is_present() => Ok(identity),
        _ => Err(DomainError::Unauthorized),
    }
}

fn validate_required(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::bill::{Bill, BillCategory};
    use crate::storage::traits::BillStorage;
    use chrono::TimeZone;

    fn create_test_service() -> (PaymentService, BillCatalog, tempfile::TempDir) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        let catalog = BillCatalog::new(connection.clone());
        let service = PaymentService::new(connection, catalog.clone());
        (service, catalog, temp_dir)
    }

    fn store_bill(catalog: &BillCatalog, id: &str, amount: f64, date: NaiveDate) -> Bill {
        let bill = Bill {
            id: id.to_string(),
            category: BillCategory::Electricity,
            title: format!("{} title", id),
            description: "test bill".to_string(),
            location: "Dhaka".to_string(),
            amount,
            date,
            image: None,
        };
        catalog.repository().store_bill(&bill).unwrap();
        bill
    }

    fn identity(user_id: &str) -> Identity {
        Identity {
            user_id: user_id.to_string(),
            email: Some(format!("{}@example.com", user_id)),
            display_name: None,
        }
    }

    fn command(bill_id: &str) -> CreatePaymentCommand {
        CreatePaymentCommand {
            bill_id: bill_id.to_string(),
            payer_name: "Alice".to_string(),
            address: "12 Green Road".to_string(),
            phone: "01700000000".to_string(),
            note: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(y: i32, m: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, day, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_create_payment_snapshots_amount_and_title() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 1450.0, d(2025, 7, 5));
        let user = identity("user-a");

        let record = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        assert_eq!(record.amount, 1450.0);
        assert_eq!(record.bill_title, "bill-1 title");
        assert_eq!(record.user_id, "user-a");
        assert_eq!(record.email.as_deref(), Some("user-a@example.com"));
        assert_eq!(record.paid_at, at(2025, 7, 10));
    }

    #[test]
    fn test_snapshot_survives_later_bill_change() {
        let (service, catalog, _temp_dir) = create_test_service();
        let mut bill = store_bill(&catalog, "bill-1", 1450.0, d(2025, 7, 5));
        let user = identity("user-a");

        service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        // The data source later changes the bill amount
        bill.amount = 9999.0;
        catalog.repository().store_bill(&bill).unwrap();

        let records = service.list_payments(Some(&user)).unwrap();
        assert_eq!(records[0].amount, 1450.0);
    }

    #[test]
    fn test_create_without_identity_fails_unauthorized_before_validation() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));

        // Payload is completely invalid, but the identity check comes first
        let bad_command = CreatePaymentCommand {
            bill_id: "bill-1".to_string(),
            payer_name: String::new(),
            address: String::new(),
            phone: String::new(),
            note: None,
        };
        let err = service
            .create_payment_at(None, bad_command, d(2025, 7, 10), at(2025, 7, 10))
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));

        let blank = Identity::new("   ");
        let err = service
            .create_payment_at(Some(&blank), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[test]
    fn test_create_for_missing_bill_fails_not_found() {
        let (service, _catalog, _temp_dir) = create_test_service();
        let user = identity("user-a");
        let err = service
            .create_payment_at(Some(&user), command("no-such-bill"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_create_outside_billing_month_fails_not_eligible() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 6, 30));
        let user = identity("user-a");

        // Valid payload, but the bill belongs to June
        let err = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 1), at(2025, 7, 1))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[test]
    fn test_create_with_missing_required_field_fails_validation() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let user = identity("user-a");

        let mut no_phone = command("bill-1");
        no_phone.phone = "  ".to_string();
        let err = service
            .create_payment_at(Some(&user), no_phone, d(2025, 7, 10), at(2025, 7, 10))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_duplicate_payments_for_same_bill_are_allowed() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let user = identity("user-a");

        let first = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();
        let second = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 11), at(2025, 7, 11))
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(service.list_payments(Some(&user)).unwrap().len(), 2);
    }

    #[test]
    fn test_list_never_leaks_other_users_records() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let alice = identity("user-a");
        let bob = identity("user-b");

        service
            .create_payment_at(Some(&alice), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        let for_bob = service.list_payments(Some(&bob)).unwrap();
        assert!(for_bob.is_empty());
        let for_alice = service.list_payments(Some(&alice)).unwrap();
        assert!(for_alice.iter().all(|r| r.user_id == "user-a"));
    }

    #[test]
    fn test_update_patches_only_supplied_fields() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let user = identity("user-a");
        let record = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        let patch = UpdatePaymentCommand {
            amount: Some(75.5),
            phone: Some("01911111111".to_string()),
            ..Default::default()
        };
        let updated = service.update_payment(Some(&user), &record.id, patch).unwrap();

        assert_eq!(updated.amount, 75.5);
        assert_eq!(updated.phone, "01911111111");
        // Untouched fields survive
        assert_eq!(updated.address, record.address);
        assert_eq!(updated.date, record.date);
        // Immutable fields survive
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.bill_id, record.bill_id);
        assert_eq!(updated.paid_at, record.paid_at);
    }

    #[test]
    fn test_update_foreign_record_fails_not_found() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let alice = identity("user-a");
        let bob = identity("user-b");
        let record = service
            .create_payment_at(Some(&alice), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        let err = service
            .update_payment(Some(&bob), &record.id, UpdatePaymentCommand::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_update_rejects_negative_amount() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let user = identity("user-a");
        let record = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        let patch = UpdatePaymentCommand {
            amount: Some(-1.0),
            ..Default::default()
        };
        let err = service.update_payment(Some(&user), &record.id, patch).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_delete_twice_second_fails_not_found() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let user = identity("user-a");
        let record = service
            .create_payment_at(Some(&user), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        service.delete_payment(Some(&user), &record.id).unwrap();
        let err = service.delete_payment(Some(&user), &record.id).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_delete_foreign_record_fails_not_found() {
        let (service, catalog, _temp_dir) = create_test_service();
        store_bill(&catalog, "bill-1", 100.0, d(2025, 7, 5));
        let alice = identity("user-a");
        let bob = identity("user-b");
        let record = service
            .create_payment_at(Some(&alice), command("bill-1"), d(2025, 7, 10), at(2025, 7, 10))
            .unwrap();

        let err = service.delete_payment(Some(&bob), &record.id).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        // Alice's record is untouched
        assert_eq!(service.list_payments(Some(&alice)).unwrap().len(), 1);
    }
}
