//! Shared DTO types exchanged between the bill-payment backend and its
//! HTTP clients. These are wire shapes only; domain invariants live in
//! the backend's domain layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A utility bill as served by the catalog endpoints.
///
/// Bills are owned by the bill data source; the backend only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDto {
    pub id: String,
    /// Category name, e.g. "Electricity", "Gas", "Water", "Internet"
    pub category: String,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Billed amount (single currency, always >= 0)
    pub amount: f64,
    /// Billing period the bill belongs to (its calendar month/year)
    pub date: NaiveDate,
    /// Optional illustrative image URL
    pub image: Option<String>,
    /// Whether the bill falls in the current payable month
    pub payable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillListResponse {
    pub bills: Vec<BillDto>,
    /// Total catalog size before category/search filtering
    pub total: usize,
}

/// A user's payment record for one bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecordDto {
    pub id: String,
    /// ID of the bill this payment refers to (weak reference)
    pub bill_id: String,
    /// Bill title captured at payment time
    pub bill_title: String,
    pub user_id: String,
    pub payer_name: String,
    pub email: Option<String>,
    pub address: String,
    pub phone: String,
    pub note: Option<String>,
    /// Amount snapshotted from the bill at creation time
    pub amount: f64,
    /// Payment date shown to the user (editable)
    pub date: NaiveDate,
    /// Creation timestamp (RFC 3339, immutable)
    pub paid_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    pub payments: Vec<PaymentRecordDto>,
    pub total_amount: f64,
}

/// Request to pay a bill. Identity fields are passed explicitly with
/// every request; the backend never infers a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub bill_id: String,
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub payer_name: String,
    pub address: String,
    pub phone: String,
    pub note: Option<String>,
}

/// Partial update of a payment record. Only the supplied fields change;
/// `id`, `bill_id`, `user_id` and `paid_at` are immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    pub user_id: String,
    pub amount: Option<f64>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePaymentResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// Aggregated totals over a set of payment records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTotalsDto {
    pub count: usize,
    pub total_amount: f64,
}

/// A rendered payment report, ready for the client to download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub filename: String,
    /// Rendered tabular document content
    pub content: String,
    pub totals: ReportTotalsDto,
    pub generated_at: String,
    pub identity_label: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. "not_found", "not_eligible"
    pub kind: String,
    pub error: String,
}
