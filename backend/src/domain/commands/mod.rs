//! Command objects passed into the domain services.

pub mod payments;
