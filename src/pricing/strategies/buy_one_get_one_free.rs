//! Buy One Get One Free
//!
//! Always active once selected: buy two, pay for one. The rule's special
//! offer fields play no part.

use crate::pricing::strategies::PricingStrategy;

/// Buy one, get one free
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyOneGetOneFree;

impl PricingStrategy for BuyOneGetOneFree {
    fn calculate_price(
        &self,
        quantity: u64,
        unit_price: u64,
        _special_quantity: Option<u64>,
        _special_price: Option<u64>,
    ) -> Option<u64> {
        let paid = quantity / 2 + quantity % 2;

        paid.checked_mul(unit_price)
    }
}
