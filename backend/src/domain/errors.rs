//! Domain error kinds surfaced by the bill-payment core.
//!
//! Every failure mode a caller can act on is a distinct variant; none
//! are folded into opaque strings. The REST layer maps these onto HTTP
//! status codes, and no variant triggers an automatic retry.

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Bill or payment record absent, or a record not owned by the
    /// caller (ownership is indistinguishable from absence).
    #[error("not found: {0}")]
    NotFound(String),

    /// An operation requiring an identity was called without one.
    #[error("operation requires a signed-in identity")]
    Unauthorized,

    /// The bill is outside its payable calendar month.
    #[error("bill {0} is not payable this month")]
    NotEligible(String),

    /// A required field is missing or invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A report was requested over zero payment records.
    #[error("no payment records to report on")]
    EmptyReport,

    /// The bill data source could not be reached or read.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    /// Stable machine-readable kind, used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::Unauthorized => "unauthorized",
            DomainError::NotEligible(_) => "not_eligible",
            DomainError::Validation(_) => "validation_error",
            DomainError::EmptyReport => "empty_report",
            DomainError::Unavailable(_) => "unavailable",
        }
    }

    /// Wrap a storage-level failure as an availability error.
    pub fn unavailable(err: anyhow::Error) -> Self {
        DomainError::Unavailable(err.to_string())
    }
}
