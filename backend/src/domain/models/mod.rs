//! Domain models for the bill-payment core.

pub mod bill;
pub mod identity;
pub mod payment;
