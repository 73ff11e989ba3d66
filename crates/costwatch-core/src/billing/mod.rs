//! Billing query client
//!
//! Thin HTTP client for the external billing service, behind the
//! [`CostSource`] seam.

mod client;

pub use client::{BillingClient, CostSource};
