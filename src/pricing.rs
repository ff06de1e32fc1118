//! Pricing
//!
//! Rules, strategies, and the service that turns a scan tally into a total.

pub mod factory;
pub mod rules;
pub mod service;
pub mod strategies;
