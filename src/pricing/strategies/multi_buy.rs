//! Multi-buy Pricing
//!
//! "3 for 130" style offers: every complete set of `special_quantity` items
//! costs `special_price`, and whatever is left over is charged at unit price.

use crate::pricing::strategies::PricingStrategy;

/// Multi-buy offer pricing
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiBuyPricing;

impl PricingStrategy for MultiBuyPricing {
    fn calculate_price(
        &self,
        quantity: u64,
        unit_price: u64,
        special_quantity: Option<u64>,
        special_price: Option<u64>,
    ) -> Option<u64> {
        match (special_quantity, special_price) {
            (Some(set_size), Some(set_price)) if set_size > 0 => {
                let sets = quantity / set_size;
                let remainder = quantity % set_size;

                sets.checked_mul(set_price)?
                    .checked_add(remainder.checked_mul(unit_price)?)
            }
            _ => quantity.checked_mul(unit_price),
        }
    }
}
