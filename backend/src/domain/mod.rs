//! Domain layer of the bill-payment core: models, pure rules and the
//! services that orchestrate them over storage.

pub mod bill_catalog;
pub mod commands;
pub mod eligibility;
pub mod errors;
pub mod models;
pub mod payment_service;
pub mod report_service;
pub mod search;

pub use bill_catalog::BillCatalog;
pub use errors::DomainError;
pub use payment_service::PaymentService;
pub use report_service::ReportService;
