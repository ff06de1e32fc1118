//! Unit Pricing

use crate::pricing::strategies::PricingStrategy;

/// Every item at its unit price; special offers are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitPricing;

impl PricingStrategy for UnitPricing {
    fn calculate_price(
        &self,
        quantity: u64,
        unit_price: u64,
        _special_quantity: Option<u64>,
        _special_price: Option<u64>,
    ) -> Option<u64> {
        quantity.checked_mul(unit_price)
    }
}
