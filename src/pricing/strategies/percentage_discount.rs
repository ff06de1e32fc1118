//! Percentage Discount
//!
//! Takes `special_price` percent off the whole line once at least
//! `special_quantity` items have been scanned. The discount is computed as
//! `total * percent / 100`, truncating toward zero.

use crate::pricing::strategies::PricingStrategy;

/// Percentage off past a quantity threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageDiscount;

impl PricingStrategy for PercentageDiscount {
    fn calculate_price(
        &self,
        quantity: u64,
        unit_price: u64,
        special_quantity: Option<u64>,
        special_price: Option<u64>,
    ) -> Option<u64> {
        let total = quantity.checked_mul(unit_price)?;

        match (special_quantity, special_price) {
            (Some(threshold), Some(percent)) if quantity >= threshold => {
                let discount = u128::from(total) * u128::from(percent) / 100;

                // Percentages above 100 bottom out at a free line.
                let price =
                    u64::try_from(discount).map_or(0, |discount| total.saturating_sub(discount));

                Some(price)
            }
            _ => Some(total),
        }
    }
}
