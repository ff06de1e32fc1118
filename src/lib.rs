//! Checkout
//!
//! Checkout is a point-of-sale pricing engine: scan SKUs, apply per-SKU
//! pricing rules and special offers, and read back a running total.

pub mod catalog;
pub mod checkout;
pub mod prelude;
pub mod pricing;
pub mod tally;
pub mod utils;
