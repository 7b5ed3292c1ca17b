//! Storage layer: abstraction traits and the CSV implementation.

pub mod csv;
pub mod traits;

pub use traits::{BillStorage, PaymentStorage};
