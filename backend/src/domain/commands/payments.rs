//! Command types for payment record operations.
use chrono::NaiveDate;

/// Command to pay a bill on behalf of an identity.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    pub bill_id: String,
    pub payer_name: String,
    pub address: String,
    pub phone: String,
    pub note: Option<String>,
}

/// Partial update of an existing payment record. `None` fields are
/// left untouched; supplied fields are validated like on creation.
#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentCommand {
    pub amount: Option<f64>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub date: Option<NaiveDate>,
}
